//! HTTP adapter over the query engine.
//!
//! The routes are a thin mapping onto the query surface; no query logic lives
//! here. Instrumentation is applied by the request middleware, not inside the
//! core.

use actix_web::{HttpResponse, Responder, get, web};
use carsdb::query::QueryEngine;
use carsdb::types::Field;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct FetchParams {
    /// One identifier, or several separated by commas.
    ids: String,
    /// Comma separated field selection.
    fields: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Comma separated field selection.
    fields: Option<String>,
    /// Sort field wire name, defaults to `model`.
    sort: Option<String>,
    /// Sort direction, `asc` or `desc`, defaults to `asc`.
    dir: Option<String>,
}

/// Splits a comma separated query parameter into its values.
fn split_csv(value: Option<&str>) -> Vec<String> {
    value
        .map(|value| {
            value
                .split(',')
                .filter(|entry| !entry.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

#[get("/v1/brands")]
pub async fn brands(engine: web::Data<QueryEngine>) -> impl Responder {
    HttpResponse::Ok().json(engine.brands())
}

#[get("/v1/cars")]
pub async fn fetch_cars(
    engine: web::Data<QueryEngine>,
    params: web::Query<FetchParams>,
) -> impl Responder {
    let fields = split_csv(params.fields.as_deref());

    // A single identifier answers with one record or null, a list answers
    // with a parallel array.
    if params.ids.contains(',') {
        let ids: Vec<String> = params.ids.split(',').map(str::to_owned).collect();

        HttpResponse::Ok().json(engine.fetch_many(&ids, &fields))
    } else {
        let result = engine.fetch(&params.ids, &fields);

        HttpResponse::Ok().json(result.unwrap_or(Value::Null))
    }
}

#[get("/v1/brands/{brand}/cars")]
pub async fn list_cars(
    engine: web::Data<QueryEngine>,
    brand: web::Path<String>,
    params: web::Query<ListParams>,
) -> impl Responder {
    let fields = split_csv(params.fields.as_deref());
    let sort_field = params
        .sort
        .as_deref()
        .and_then(Field::from_name)
        .unwrap_or(Field::Model);
    let direction = params
        .dir
        .as_deref()
        .and_then(|dir| dir.parse().ok())
        .unwrap_or_default();

    HttpResponse::Ok().json(engine.list(&brand, &fields, sort_field, direction))
}
