//! C-compatible exports called by the native host

use std::borrow::Cow;
use std::ffi::{c_char, c_int, c_void, CStr};
use std::sync::OnceLock;

use parking_lot::Mutex;
use tracing::instrument;
use tracing_subscriber::EnvFilter;

use netvars_core::{ForestDump, NetvarConfig, NetvarRegistry, UNRESOLVED_OFFSET};
use netvars_host::LiveClassList;
use netvars_sdk::ClientClass;

// Plugin metadata - static strings with null terminators for C compatibility
static NAME: &[u8] = b"netvars\0";
static VERSION: &[u8] = b"0.1.0\0";

/// The process-wide registry, built once by `netvars_init*`
static REGISTRY: OnceLock<NetvarRegistry> = OnceLock::new();

/// Message of the most recent failure, for `netvars_last_error`
static LAST_ERROR: Mutex<String> = parking_lot::const_mutex(String::new());

/// Load the config and install the tracing subscriber
fn init_runtime() -> NetvarConfig {
    let (config, load_error) = match NetvarConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (NetvarConfig::default(), Some(e)),
    };

    let default_level = if config.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    if let Some(e) = load_error {
        tracing::warn!("Using default netvar config: {}", e);
    }
    config
}

fn set_last_error(msg: impl Into<String>) {
    let msg = msg.into();
    tracing::error!("{}", msg);
    *LAST_ERROR.lock() = msg;
}

/// Build and install the registry unless one exists
///
/// Concurrent callers block on the first build; only that caller succeeds.
fn install(build: impl FnOnce() -> NetvarRegistry) -> bool {
    let mut built = false;
    REGISTRY.get_or_init(|| {
        built = true;
        build()
    });

    if !built {
        set_last_error("Netvar registry already initialized");
        return false;
    }
    tracing::info!("Netvar registry installed");
    true
}

fn registry() -> Option<&'static NetvarRegistry> {
    let registry = REGISTRY.get();
    if registry.is_none() {
        set_last_error("Netvar registry not initialized");
    }
    registry
}

/// Read a C string argument, recording an error for null
///
/// # Safety
/// `ptr` must be null or a valid NUL-terminated string
unsafe fn read_arg<'a>(ptr: *const c_char, what: &str) -> Option<Cow<'a, str>> {
    if ptr.is_null() {
        set_last_error(format!("Null {}", what));
        return None;
    }
    Some(CStr::from_ptr(ptr).to_string_lossy())
}

/// Build the registry from the host's `ClientClass` list
///
/// # Safety
/// - `client_classes` must be the head returned by `IBaseClientDLL::GetAllClasses`
/// - The client module must stay loaded for the rest of the process
#[no_mangle]
#[instrument(skip_all)]
pub unsafe extern "C" fn netvars_init(client_classes: *mut c_void) -> bool {
    let config = init_runtime();

    let classes = match LiveClassList::from_raw(client_classes as *mut ClientClass) {
        Ok(classes) => classes,
        Err(e) => {
            set_last_error(format!("Host error: {}", e));
            return false;
        }
    };

    install(|| NetvarRegistry::build(&classes, &config))
}

/// Build the registry from a JSON dump file
///
/// # Safety
/// - `path` must be a valid null-terminated C string
#[no_mangle]
#[instrument(skip_all)]
pub unsafe extern "C" fn netvars_init_from_dump(path: *const c_char) -> bool {
    let config = init_runtime();

    let Some(path) = read_arg(path, "dump path") else {
        return false;
    };

    match ForestDump::load_from_file(&*path) {
        Ok(dump) => install(|| NetvarRegistry::build(&dump, &config)),
        Err(e) => {
            set_last_error(format!("Dump error: {}", e));
            false
        }
    }
}

/// Check if the registry has been built
#[no_mangle]
pub extern "C" fn netvars_is_initialized() -> bool {
    REGISTRY.get().is_some()
}

/// Resolve a chained path (`Class.prop.prop`), returning -1 on failure
///
/// # Safety
/// - `path` must be a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn netvars_find_offset(path: *const c_char) -> c_int {
    let Some(registry) = registry() else {
        return UNRESOLVED_OFFSET;
    };
    let Some(path) = read_arg(path, "path") else {
        return UNRESOLVED_OFFSET;
    };

    match registry.resolve(&path) {
        Ok(offset) => offset,
        Err(e) => {
            set_last_error(format!("{} (netvar {})", e, path));
            UNRESOLVED_OFFSET
        }
    }
}

/// Resolve `prop` inside a dotted class path, returning -1 on failure
///
/// # Safety
/// - `prop` and `class_path` must be valid null-terminated C strings
#[no_mangle]
pub unsafe extern "C" fn netvars_find_offset_in(
    prop: *const c_char,
    class_path: *const c_char,
) -> c_int {
    let Some(registry) = registry() else {
        return UNRESOLVED_OFFSET;
    };
    let (Some(prop), Some(class_path)) = (
        read_arg(prop, "property name"),
        read_arg(class_path, "class path"),
    ) else {
        return UNRESOLVED_OFFSET;
    };

    match registry.resolve_in(&prop, &class_path) {
        Ok(offset) => offset,
        Err(e) => {
            set_last_error(format!("{} (netvar {} in {})", e, prop, class_path));
            UNRESOLVED_OFFSET
        }
    }
}

/// Write the registry's forest to a JSON dump file
///
/// # Safety
/// - `path` must be a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn netvars_save_dump(path: *const c_char) -> bool {
    let Some(registry) = registry() else {
        return false;
    };
    let Some(path) = read_arg(path, "dump path") else {
        return false;
    };

    match registry.dump().save_to_file(&*path) {
        Ok(()) => true,
        Err(e) => {
            set_last_error(format!("Dump error: {}", e));
            false
        }
    }
}

/// Copy the most recent error message into `buf`
///
/// Returns the full message length in bytes (excluding the terminator).
///
/// # Safety
/// - `buf` must be a valid pointer to a buffer of at least `maxlen` bytes, or null
#[no_mangle]
pub unsafe extern "C" fn netvars_last_error(buf: *mut c_char, maxlen: usize) -> usize {
    let msg = LAST_ERROR.lock();
    write_error(buf, maxlen, &msg);
    msg.len()
}

#[no_mangle]
pub extern "C" fn netvars_get_name() -> *const c_char {
    NAME.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn netvars_get_version() -> *const c_char {
    VERSION.as_ptr() as *const c_char
}

/// Helper to write an error message to a C buffer
///
/// # Safety
/// - `error` must be a valid pointer or null
/// - `maxlen` must accurately reflect the buffer size
unsafe fn write_error(error: *mut c_char, maxlen: usize, msg: &str) {
    if !error.is_null() && maxlen > 0 {
        let bytes = msg.as_bytes();
        let len = bytes.len().min(maxlen - 1);
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), error as *mut u8, len);
        *error.add(len) = 0;
    }
}
