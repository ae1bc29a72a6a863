//! Example client flow against the Tessera proxy.
//!
//! Lists the `Endpoint` entities of the example application and, when an
//! entity id is passed as the first argument, updates that entity's
//! description. The proxy (real or `mock-proxy`) is expected at
//! `PROXY_BASE_URL`, defaulting to `http://localhost:3000/api/tessera`.
//!
//! Each call's failure is printed and the flow continues, but the process
//! exit code reflects whether everything succeeded.

use std::env;
use std::error::Error;
use std::process::ExitCode;

use serde_json::{json, Value};
use tessera_core::{
    HttpMethod, HttpRequest, HttpResponse, Params, TesseraClient, APP_ID, ENDPOINT_ENTITY,
};
use ureq::Agent;

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// 4xx/5xx come back as data (`http_status_as_error(false)`) so the client
/// core can turn them into `ApiError::Http` with the body attached; only
/// transport failures (refused connection, DNS) surface as `Err` here.
fn execute(agent: &Agent, req: HttpRequest) -> Result<HttpResponse, ureq::Error> {
    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => {
            let mut builder = agent.get(&req.path);
            for (key, value) in &req.headers {
                builder = builder.header(key, value);
            }
            for (key, value) in &req.query {
                builder = builder.query(key, value);
            }
            builder.call()?
        }
        (HttpMethod::Delete, _) => agent.delete(&req.path).call()?,
        (method, body) => {
            let mut builder = match method {
                HttpMethod::Put => agent.put(&req.path),
                _ => agent.post(&req.path),
            };
            for (key, value) in &req.headers {
                builder = builder.header(key, value);
            }
            match body {
                Some(body) => builder.send(body.as_bytes())?,
                None => builder.send_empty()?,
            }
        }
    };

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

/// Generic request through the proxy: build, execute, parse.
fn api_request(
    agent: &Agent,
    client: &TesseraClient,
    path_suffix: &str,
    method: HttpMethod,
    data: Option<&Params>,
) -> Result<Value, Box<dyn Error>> {
    let req = client.build_request(path_suffix, method, data)?;
    println!("making {} request to: {}", req.method, req.path);
    let response = execute(agent, req)?;
    Ok(client.parse_response(response)?)
}

/// Update one `Endpoint` entity by id through the specialized entry point.
fn update_entity(
    agent: &Agent,
    client: &TesseraClient,
    entity_id: &str,
    update: &Params,
) -> Result<Value, Box<dyn Error>> {
    let req = client.build_update_entity(entity_id, update)?;
    println!("making {} request to: {}", req.method, req.path);
    let response = execute(agent, req)?;
    Ok(client.parse_response(response)?)
}

fn main() -> ExitCode {
    let base_url = env::var("PROXY_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000/api/tessera".to_string());
    let client = TesseraClient::new(&base_url);
    let agent = Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut failed = false;

    // Read the Endpoint entities of the example application.
    let collection = format!("apps/{APP_ID}/entities/{ENDPOINT_ENTITY}");
    match api_request(&agent, &client, &collection, HttpMethod::Get, None) {
        Ok(entities) => {
            println!("\n--- entities ---");
            println!("{entities:#}");
        }
        Err(e) => {
            eprintln!("error making API request: {e}");
            failed = true;
        }
    }

    // Update an entity when an id was supplied on the command line.
    if let Some(entity_id) = env::args().nth(1) {
        let mut update = Params::new();
        update.insert("description".to_string(), json!("Updated via proxy"));
        match update_entity(&agent, &client, &entity_id, &update) {
            Ok(updated) => {
                println!("\n--- updated entity ---");
                println!("{updated:#}");
            }
            Err(e) => {
                eprintln!("error updating entity: {e}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
