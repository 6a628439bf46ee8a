//! Shipment CRUD form handlers. Field handling is deliberately dumb: write
//! what was given.

use axum::{
    Form,
    extract::{Path, Query, RawForm, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use uuid::Uuid;

use super::AppState;
use super::pages;
use crate::prelude::*;
use crate::store::{ShipmentFields, next_shipment_number};

#[derive(Debug, Deserialize)]
pub struct CreateNotice {
    pub success: Option<String>,
}

pub async fn create_form(
    State(state): State<AppState>,
    Query(notice): Query<CreateNotice>,
) -> Result<Html<String>> {
    let latest = state.shipments.latest_shipment_number()?;
    let next = next_shipment_number(latest.as_deref());
    Ok(Html(pages::create_shipment(&next, notice.success.as_deref())))
}

/// Field names as the create form posts them.
#[derive(Debug, Deserialize)]
pub struct CreateShipmentForm {
    #[serde(rename = "shipmentNumber")]
    pub shipment_number: String,
    pub route: String,
    pub device: String,
    #[serde(rename = "poNumber")]
    pub po_number: String,
    #[serde(rename = "ndcNumber")]
    pub ndc_number: String,
    #[serde(rename = "serialNumber")]
    pub serial_number: String,
    #[serde(rename = "goodsType")]
    pub goods_type: String,
    #[serde(rename = "deliveryDate")]
    pub delivery_date: String,
    #[serde(rename = "deliveryNumber")]
    pub delivery_number: String,
    #[serde(rename = "batchId")]
    pub batch_id: String,
    #[serde(rename = "shipmentDesc")]
    pub description: String,
}

impl From<CreateShipmentForm> for ShipmentFields {
    fn from(form: CreateShipmentForm) -> Self {
        Self {
            shipment_number: form.shipment_number,
            route: form.route,
            device: form.device,
            po_number: form.po_number,
            ndc_number: form.ndc_number,
            serial_number: form.serial_number,
            goods_type: form.goods_type,
            expected_delivery_date: form.delivery_date,
            delivery_number: form.delivery_number,
            batch_id: form.batch_id,
            description: form.description,
        }
    }
}

#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<CreateShipmentForm>,
) -> Result<Redirect> {
    state.shipments.insert(form.into())?;
    Ok(Redirect::to(
        "/create-shipment?success=Shipment+created+successfully",
    ))
}

pub async fn all(State(state): State<AppState>) -> Result<Html<String>> {
    let shipments = state.shipments.all()?;
    Ok(Html(pages::all_shipments(&shipments)))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>> {
    let shipment = state.shipments.find(id)?.ok_or(Error::RecordNotFound)?;
    Ok(Html(pages::edit_shipment(&shipment)))
}

/// Field names as the edit form posts them.
#[derive(Debug, Deserialize)]
pub struct EditShipmentForm {
    pub shipment_number: String,
    pub route: String,
    pub device: String,
    pub po_number: String,
    pub ndc_number: String,
    pub serial_number: String,
    pub goods_type: String,
    pub expected_delivery_date: String,
    pub delivery_number: String,
    pub batch_id: String,
    pub shipment_description: String,
}

#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<EditShipmentForm>,
) -> Result<Redirect> {
    let fields = ShipmentFields {
        shipment_number: form.shipment_number,
        route: form.route,
        device: form.device,
        po_number: form.po_number,
        ndc_number: form.ndc_number,
        serial_number: form.serial_number,
        goods_type: form.goods_type,
        expected_delivery_date: form.expected_delivery_date,
        delivery_number: form.delivery_number,
        batch_id: form.batch_id,
        description: form.shipment_description,
    };
    state.shipments.update(id, fields)?;
    Ok(Redirect::to("/allshipment"))
}

/// Deletes every shipment ticked in the list form. The checkbox group posts
/// `selected_shipments` once per selection, so the body is walked pair by
/// pair instead of through a typed form.
#[axum::debug_handler]
pub async fn delete_selected(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Redirect> {
    for (key, value) in url::form_urlencoded::parse(&body) {
        if key == "selected_shipments"
            && let Ok(id) = value.parse::<Uuid>()
        {
            state.shipments.delete(id)?;
        }
    }
    Ok(Redirect::to("/allshipment"))
}
