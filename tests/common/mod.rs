//! Shared test support: an in-process cache server speaking the wire
//! protocol over a loopback listener.
//!
//! The server implements just enough cache semantics (storage, ttl expiry,
//! auth, resize, policy, status counters) to exercise every client
//! operation, and can be configured to drop its first connection after a
//! number of responses or to stop accepting after a number of connections,
//! which is how the reconnect paths are tested.

use std::collections::HashMap;
use std::io::Write;
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use ember_client::protocol::{FrameReader, FrameWriter};

pub const SERVER_VERSION: &str = "1.2.3";

#[derive(Default)]
pub struct ServerOptions {
    /// Token every session must present before non-handshake operations
    pub auth_token: Option<String>,

    /// Abruptly close the first accepted connection after this many
    /// responses
    pub drop_first_conn_after: Option<usize>,

    /// Stop accepting (and release the port) after this many connections
    pub max_conns: Option<usize>,
}

pub struct TestServer {
    addr: String,
}

impl TestServer {
    pub fn spawn() -> Self {
        Self::spawn_with(ServerOptions::default())
    }

    pub fn spawn_with(options: ServerOptions) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = format!("ember://{}", listener.local_addr().unwrap());

        let state = Arc::new(Mutex::new(CacheState::new()));
        let options = Arc::new(options);

        thread::spawn(move || {
            let mut accepted = 0usize;

            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };

                let first = accepted == 0;
                accepted += 1;

                let conn_state = Arc::clone(&state);
                let conn_options = Arc::clone(&options);

                thread::spawn(move || handle_conn(stream, conn_state, conn_options, first));

                if let Some(max) = options.max_conns {
                    if accepted >= max {
                        break;
                    }
                }
            }
            // listener dropped here; further connects are refused
        });

        Self { addr }
    }

    /// The server's `ember://host:port` address
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

struct Entry {
    value: String,
    expiry: Option<Instant>,
}

struct CacheState {
    store: HashMap<String, Entry>,
    max_size: u64,
    policies: Vec<String>,
    policy: String,
    total_gets: u64,
    total_sets: u64,
    total_dels: u64,
    misses: u64,
    started: Instant,
}

impl CacheState {
    fn new() -> Self {
        Self {
            store: HashMap::new(),
            max_size: 1024 * 1024,
            policies: vec!["lfu".into(), "fifo".into(), "lru".into(), "mru".into()],
            policy: "lru".into(),
            total_gets: 0,
            total_sets: 0,
            total_dels: 0,
            misses: 0,
            started: Instant::now(),
        }
    }

    fn live_value(&self, key: &str) -> Option<String> {
        self.store
            .get(key)
            .filter(|entry| match entry.expiry {
                None => true,
                Some(expiry) => Instant::now() < expiry,
            })
            .map(|entry| entry.value.clone())
    }

    fn used_size(&self) -> u64 {
        self.store.values().map(|e| e.value.len() as u64).sum()
    }
}

fn handle_conn(
    mut stream: TcpStream,
    state: Arc<Mutex<CacheState>>,
    options: Arc<ServerOptions>,
    first: bool,
) {
    let mut authed = options.auth_token.is_none();
    let mut responses = 0usize;

    loop {
        let mut read_stream = stream.try_clone().unwrap();
        let mut reader = FrameReader::new(&mut read_stream);

        let Ok(opcode) = reader.read_u8() else {
            return; // client closed
        };

        let response = match opcode {
            // ping
            0 => ok_string("pong"),
            // version
            1 => ok_string(SERVER_VERSION),
            // auth
            2 => {
                let token = reader.read_string().unwrap();
                match &options.auth_token {
                    Some(expected) if *expected != token => err_session(3),
                    _ => {
                        authed = true;
                        ok_string("ok")
                    }
                }
            }
            _ if !authed => {
                drain_args(&mut reader, opcode);
                err_session(3)
            }
            // get
            3 => {
                let key = reader.read_string().unwrap();
                let mut state = state.lock().unwrap();
                state.total_gets += 1;
                match state.live_value(&key) {
                    Some(value) => ok_string(&value),
                    None => {
                        state.misses += 1;
                        err_cache(1)
                    }
                }
            }
            // set
            4 => {
                let key = reader.read_string().unwrap();
                let value = reader.read_string().unwrap();
                let ttl = reader.read_u32().unwrap();

                if value.is_empty() {
                    err_cache(2)
                } else {
                    let expiry =
                        (ttl > 0).then(|| Instant::now() + Duration::from_secs(ttl as u64));
                    let mut state = state.lock().unwrap();
                    state.total_sets += 1;
                    state.store.insert(key, Entry { value, expiry });
                    ok_string("ok")
                }
            }
            // del
            5 => {
                let key = reader.read_string().unwrap();
                let mut state = state.lock().unwrap();
                state.total_dels += 1;
                match state.store.remove(&key) {
                    Some(_) => ok_string("ok"),
                    None => err_cache(1),
                }
            }
            // has
            6 => {
                let key = reader.read_string().unwrap();
                let state = state.lock().unwrap();
                ok_bool(state.live_value(&key).is_some())
            }
            // peek
            7 => {
                let key = reader.read_string().unwrap();
                let state = state.lock().unwrap();
                match state.live_value(&key) {
                    Some(value) => ok_string(&value),
                    None => err_cache(1),
                }
            }
            // ttl
            8 => {
                let key = reader.read_string().unwrap();
                let ttl = reader.read_u32().unwrap();
                let mut state = state.lock().unwrap();
                match state.store.get_mut(&key) {
                    Some(entry) => {
                        entry.expiry =
                            (ttl > 0).then(|| Instant::now() + Duration::from_secs(ttl as u64));
                        ok_string("ok")
                    }
                    None => err_cache(1),
                }
            }
            // size
            9 => {
                let key = reader.read_string().unwrap();
                let state = state.lock().unwrap();
                match state.live_value(&key) {
                    Some(value) => ok_u32(value.len() as u32),
                    None => err_cache(1),
                }
            }
            // wipe
            10 => {
                state.lock().unwrap().store.clear();
                ok_string("ok")
            }
            // resize
            11 => {
                let size = reader.read_u64().unwrap();
                if size == 0 {
                    err_cache(4)
                } else {
                    state.lock().unwrap().max_size = size;
                    ok_string("ok")
                }
            }
            // policy
            12 => {
                let policy = reader.read_string().unwrap();
                let mut state = state.lock().unwrap();
                if state.policies.contains(&policy) {
                    state.policy = policy;
                    ok_string("ok")
                } else {
                    err_cache(6)
                }
            }
            // status
            13 => {
                let state = state.lock().unwrap();
                status_frame(&state)
            }
            _ => return,
        };

        if stream.write_all(response.as_bytes()).is_err() {
            return;
        }
        responses += 1;

        if first {
            if let Some(limit) = options.drop_first_conn_after {
                if responses >= limit {
                    return; // socket closed abruptly
                }
            }
        }
    }
}

/// Consume the arguments of a request that is being rejected, so the stream
/// stays framed for the next request.
fn drain_args(reader: &mut FrameReader<'_, TcpStream>, opcode: u8) {
    match opcode {
        // key only
        3 | 5 | 6 | 7 | 9 => {
            let _ = reader.read_string();
        }
        // key + value + ttl
        4 => {
            let _ = reader.read_string();
            let _ = reader.read_string();
            let _ = reader.read_u32();
        }
        // key + ttl
        8 => {
            let _ = reader.read_string();
            let _ = reader.read_u32();
        }
        // u64
        11 => {
            let _ = reader.read_u64();
        }
        // policy name
        12 => {
            let _ = reader.read_string();
        }
        _ => {}
    }
}

fn ok_string(value: &str) -> FrameWriter {
    let mut frame = FrameWriter::new();
    frame.write_bool(true);
    frame.write_string(value);
    frame
}

fn ok_bool(value: bool) -> FrameWriter {
    let mut frame = FrameWriter::new();
    frame.write_bool(true);
    frame.write_bool(value);
    frame
}

fn ok_u32(value: u32) -> FrameWriter {
    let mut frame = FrameWriter::new();
    frame.write_bool(true);
    frame.write_u32(value);
    frame
}

fn err_session(code: u8) -> FrameWriter {
    let mut frame = FrameWriter::new();
    frame.write_bool(false);
    frame.write_u8(code);
    frame
}

fn err_cache(sub_code: u8) -> FrameWriter {
    let mut frame = FrameWriter::new();
    frame.write_bool(false);
    frame.write_u8(0);
    frame.write_u8(sub_code);
    frame
}

fn status_frame(state: &CacheState) -> FrameWriter {
    let mut frame = FrameWriter::new();
    frame.write_bool(true);

    frame.write_u32(std::process::id());

    frame.write_u64(state.max_size);
    frame.write_u64(state.used_size());
    frame.write_u64(state.store.len() as u64);

    frame.write_u64(0); // rss
    frame.write_u64(state.used_size()); // hwm

    frame.write_u64(state.total_gets);
    frame.write_u64(state.total_sets);
    frame.write_u64(state.total_dels);

    let miss_ratio = if state.total_gets > 0 {
        state.misses as f64 / state.total_gets as f64
    } else {
        0.0
    };
    frame.write_f64(miss_ratio);

    frame.write_u32(state.policies.len() as u32);
    for policy in &state.policies {
        frame.write_string(policy);
    }

    frame.write_string(&state.policy);
    frame.write_bool(false);

    frame.write_u64(state.started.elapsed().as_millis() as u64);

    frame
}
