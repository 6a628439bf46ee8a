//! Server-rendered pages: plain string assembly, no template engine.

use crate::store::{ShipmentRecord, UserRecord};

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n{body}\n</body>\n</html>"
    )
}

fn notice(error: Option<&str>, message: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(error) = error {
        out.push_str(&format!("<p class=\"error\">{}</p>", escape(error)));
    }
    if let Some(message) = message {
        out.push_str(&format!("<p class=\"message\">{}</p>", escape(message)));
    }
    out
}

pub fn login(error: Option<&str>, message: Option<&str>) -> String {
    let body = format!(
        "<h1>Login</h1>{}\
         <form method=\"post\" action=\"/login\">\
         <input name=\"username\" type=\"email\" placeholder=\"Email\">\
         <input name=\"password\" type=\"password\" placeholder=\"Password\">\
         <button type=\"submit\">Login</button>\
         </form>\
         <a href=\"/signup\">Create an account</a>",
        notice(error, message)
    );
    layout("Login", &body)
}

pub fn signup(error: Option<&str>) -> String {
    let body = format!(
        "<h1>Sign up</h1>{}\
         <form method=\"post\" action=\"/signup\">\
         <input name=\"fullname\" placeholder=\"Full name\">\
         <input name=\"email\" type=\"email\" placeholder=\"Email\">\
         <input name=\"password\" type=\"password\" placeholder=\"Password\">\
         <input name=\"confirm_password\" type=\"password\" placeholder=\"Confirm password\">\
         <select name=\"role\"><option value=\"user\">User</option><option value=\"admin\">Admin</option></select>\
         <button type=\"submit\">Sign up</button>\
         </form>",
        notice(error, None)
    );
    layout("Sign up", &body)
}

pub fn dashboard(name: &str, message: Option<&str>) -> String {
    let body = format!(
        "<h1>Welcome, {}</h1>{}\
         <nav><a href=\"/allshipment\">Shipments</a> \
         <a href=\"/create-shipment\">New shipment</a> \
         <a href=\"/logout\">Logout</a></nav>",
        escape(name),
        notice(None, message)
    );
    layout("Dashboard", &body)
}

pub fn admin_dashboard(name: &str) -> String {
    let body = format!(
        "<h1>Admin dashboard</h1><p>Welcome, {}</p>\
         <nav><a href=\"/allshipment\">Shipments</a> \
         <a href=\"/Manageusers\">Manage users</a> \
         <a href=\"/logout\">Logout</a></nav>",
        escape(name)
    );
    layout("Admin dashboard", &body)
}

fn shipment_inputs(names: [&str; 11], values: &[&str; 11], labels: [&str; 11]) -> String {
    names
        .iter()
        .zip(values.iter())
        .zip(labels.iter())
        .map(|((name, value), label)| {
            format!(
                "<input name=\"{name}\" value=\"{}\" placeholder=\"{label}\">",
                escape(value)
            )
        })
        .collect()
}

const CREATE_FIELD_NAMES: [&str; 11] = [
    "shipmentNumber",
    "route",
    "device",
    "poNumber",
    "ndcNumber",
    "serialNumber",
    "goodsType",
    "deliveryDate",
    "deliveryNumber",
    "batchId",
    "shipmentDesc",
];

const EDIT_FIELD_NAMES: [&str; 11] = [
    "shipment_number",
    "route",
    "device",
    "po_number",
    "ndc_number",
    "serial_number",
    "goods_type",
    "expected_delivery_date",
    "delivery_number",
    "batch_id",
    "shipment_description",
];

const FIELD_LABELS: [&str; 11] = [
    "Shipment number",
    "Route",
    "Device",
    "PO number",
    "NDC number",
    "Serial number",
    "Goods type",
    "Expected delivery date",
    "Delivery number",
    "Batch id",
    "Description",
];

pub fn create_shipment(next_number: &str, success: Option<&str>) -> String {
    let mut values = [""; 11];
    values[0] = next_number;
    let body = format!(
        "<h1>Create shipment</h1>{}\
         <form method=\"post\" action=\"/create-shipment\">{}\
         <button type=\"submit\">Create</button></form>",
        notice(None, success),
        shipment_inputs(CREATE_FIELD_NAMES, &values, FIELD_LABELS)
    );
    layout("Create shipment", &body)
}

pub fn all_shipments(shipments: &[ShipmentRecord]) -> String {
    let rows: String = shipments
        .iter()
        .map(|shipment| {
            let f = &shipment.fields;
            format!(
                "<tr><td><input type=\"checkbox\" name=\"selected_shipments\" value=\"{id}\" form=\"delete\"></td>\
                 <td>{number}</td><td>{route}</td><td>{device}</td><td>{goods}</td><td>{date}</td>\
                 <td><a href=\"/editshipment/{id}\">Edit</a></td></tr>",
                id = shipment.id,
                number = escape(&f.shipment_number),
                route = escape(&f.route),
                device = escape(&f.device),
                goods = escape(&f.goods_type),
                date = escape(&f.expected_delivery_date),
            )
        })
        .collect();
    let body = format!(
        "<h1>All shipments</h1>\
         <table><tr><th></th><th>Number</th><th>Route</th><th>Device</th><th>Goods</th><th>Delivery</th><th></th></tr>{rows}</table>\
         <form id=\"delete\" method=\"post\" action=\"/deleteshipments\">\
         <button type=\"submit\">Delete selected</button></form>"
    );
    layout("All shipments", &body)
}

pub fn edit_shipment(shipment: &ShipmentRecord) -> String {
    let f = &shipment.fields;
    let values = [
        f.shipment_number.as_str(),
        f.route.as_str(),
        f.device.as_str(),
        f.po_number.as_str(),
        f.ndc_number.as_str(),
        f.serial_number.as_str(),
        f.goods_type.as_str(),
        f.expected_delivery_date.as_str(),
        f.delivery_number.as_str(),
        f.batch_id.as_str(),
        f.description.as_str(),
    ];
    let body = format!(
        "<h1>Edit shipment</h1>\
         <form method=\"post\" action=\"/editshipment/{}\">{}\
         <button type=\"submit\">Save</button></form>",
        shipment.id,
        shipment_inputs(EDIT_FIELD_NAMES, &values, FIELD_LABELS)
    );
    layout("Edit shipment", &body)
}

pub fn manage_users(users: &[UserRecord]) -> String {
    let rows: String = users
        .iter()
        .map(|user| {
            format!(
                "<tr><td>{name}</td><td>{email}</td><td>{role}</td>\
                 <td><a href=\"/edit_user/{id}\">Edit</a></td>\
                 <td><form method=\"post\" action=\"/delete_user/{id}\"><button>Delete</button></form></td></tr>",
                id = user.id,
                name = escape(&user.name),
                email = escape(&user.email),
                role = user.role,
            )
        })
        .collect();
    let body = format!(
        "<h1>Manage users</h1>\
         <table><tr><th>Name</th><th>Email</th><th>Role</th><th></th><th></th></tr>{rows}</table>"
    );
    layout("Manage users", &body)
}

pub fn edit_user(user: &UserRecord) -> String {
    let body = format!(
        "<h1>Edit user</h1>\
         <form method=\"post\" action=\"/edit_user/{id}\">\
         <input name=\"name\" value=\"{name}\">\
         <input name=\"email\" type=\"email\" value=\"{email}\">\
         <select name=\"role\"><option value=\"user\">User</option><option value=\"admin\">Admin</option></select>\
         <button type=\"submit\">Save</button></form>",
        id = user.id,
        name = escape(&user.name),
        email = escape(&user.email),
    );
    layout("Edit user", &body)
}
