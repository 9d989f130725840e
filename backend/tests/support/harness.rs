//! Server harness and shared world for behaviour suites.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` stops the server
//! even if a step panics.

use std::cell::RefCell;
use std::rc::Rc;

use actix_web::dev::ServerHandle;
use actix_web::http::Method;
use awc::Client;
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use crate::server::spawn_storefront;

pub(crate) struct StorefrontWorld {
    runtime: Runtime,
    local: LocalSet,
    base_url: String,
    server: ServerHandle,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
}

pub(crate) type SharedWorld = Rc<RefCell<StorefrontWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        // The LocalSet must be driven on its owning thread; the future below
        // must not borrow the world.
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

/// Send a request and record its status and JSON body on the world.
pub(crate) fn perform_json_request(
    world: &SharedWorld,
    method: Method,
    path: &str,
    payload: Option<Value>,
) {
    let (status, body) = {
        let ctx = world.borrow();
        let url = format!("{}{path}", ctx.base_url);
        ctx.local.block_on(&ctx.runtime, async move {
            let request = Client::default().request(method, url);
            let mut response = match payload {
                Some(payload) => request.send_json(&payload).await,
                None => request.send().await,
            }
            .expect("request should complete");
            let body: Value = response.json().await.expect("JSON body");
            (response.status().as_u16(), body)
        })
    };

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_body = Some(body);
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_storefront() })
        .expect("server should start");

    WorldFixture {
        world: Rc::new(RefCell::new(StorefrontWorld {
            runtime,
            local,
            base_url,
            server,
            last_status: None,
            last_body: None,
        })),
    }
}
