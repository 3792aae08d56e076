//! Cache consistency through the public facade: a successful mutation is
//! visible on the very next read, a rejected one leaves cached data alone.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use admin::channel::{ChannelError, CommandChannel};
use admin::{Admin, AdminConfig};

// Captures the facade's tracing output in test output; RUST_LOG selects the
// level. Repeated init attempts are fine, only the first one wins.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct FakeServer {
    map: Mutex<String>,
    map_reads: AtomicUsize,
    accept_mutations: AtomicBool,
}

impl FakeServer {
    fn new(map: &str) -> Self {
        Self {
            map: Mutex::new(map.to_owned()),
            map_reads: AtomicUsize::new(0),
            accept_mutations: AtomicBool::new(true),
        }
    }

    fn reads(&self) -> usize {
        self.map_reads.load(Ordering::SeqCst)
    }
}

impl CommandChannel for FakeServer {
    fn execute<'a>(&self, command: &str, args: &[&'a str]) -> Result<String, ChannelError> {
        match command {
            "get map" => {
                self.map_reads.fetch_add(1, Ordering::SeqCst);
                Ok(self.map.lock().clone())
            }
            "map" => {
                if !self.accept_mutations.load(Ordering::SeqCst) {
                    return Ok("FAIL".to_owned());
                }
                *self.map.lock() = args[0].to_owned();
                Ok("SUCCESS".to_owned())
            }
            other => Err(ChannelError::CommandFailed(format!(
                "unscripted command: {other}"
            ))),
        }
    }
}

#[test]
fn successful_mutation_is_visible_on_the_next_read() {
    init_tracing();
    let server = Arc::new(FakeServer::new("foy_warfare"));
    let admin = Admin::new(server.clone(), AdminConfig::default());

    assert_eq!(admin.get_map().unwrap().as_str(), "foy_warfare");
    assert_eq!(admin.get_map().unwrap().as_str(), "foy_warfare");
    assert_eq!(server.reads(), 1, "second read must come from cache");

    admin.set_map("carentan_warfare").unwrap();

    assert_eq!(admin.get_map().unwrap().as_str(), "carentan_warfare");
    assert_eq!(server.reads(), 2, "mutation must purge the cached read");
}

#[test]
fn rejected_mutation_keeps_the_cached_value() {
    init_tracing();
    let server = Arc::new(FakeServer::new("foy_warfare"));
    let admin = Admin::new(server.clone(), AdminConfig::default());

    assert_eq!(admin.get_map().unwrap().as_str(), "foy_warfare");
    server.accept_mutations.store(false, Ordering::SeqCst);

    assert!(admin.set_map("carentan_warfare").is_err());

    assert_eq!(admin.get_map().unwrap().as_str(), "foy_warfare");
    assert_eq!(server.reads(), 1, "failed mutation must not purge the cache");
}
