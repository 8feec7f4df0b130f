//! Live server harness and shared world for user API behaviour tests.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` stops the server
//! even if a step panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use user_api::Trace;
use user_api::domain::{UserDirectoryService, default_seed_users, seed_users};
use user_api::inbound::http::state::HttpState;
use user_api::inbound::http::users;
use user_api::outbound::persistence::InMemoryUserRepository;

pub(crate) struct UserApiWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) repository: Arc<InMemoryUserRepository>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<UserApiWorld>>;

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
        shutdown(self.world.clone());
    }
}

fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it. The future must
    // not borrow the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

async fn spawn_server(
    repository: Arc<InMemoryUserRepository>,
) -> Result<(String, ServerHandle), String> {
    seed_users(repository.as_ref(), &default_seed_users())
        .await
        .map_err(|err| err.to_string())?;

    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let http_data = web::Data::new(HttpState::new(Arc::new(UserDirectoryService::new(
        repository,
    ))));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .wrap(Trace)
            .service(users::scope())
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    let repository = Arc::new(InMemoryUserRepository::new());

    let (base_url, server) = local
        .block_on(&runtime, spawn_server(Arc::clone(&repository)))
        .expect("server should start");

    let world = Rc::new(RefCell::new(UserApiWorld {
        runtime,
        local,
        base_url,
        server,
        repository,
        last_status: None,
        last_body: None,
        last_trace_id: None,
    }));

    WorldFixture { world }
}
