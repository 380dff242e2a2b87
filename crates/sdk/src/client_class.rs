//! Client class list definitions
//!
//! The client DLL exposes every networked class as a node in a singly-linked
//! list (`IBaseClientDLL::GetAllClasses`). Each node names the class and
//! points at the root `RecvTable` describing its networked fields.

use std::ffi::{c_char, c_int, c_void};

use crate::recv::RecvTable;

/// Factory creating a client-side networkable for a server entity
pub type CreateClientClassFn = unsafe extern "C" fn(ent: c_int, serial: c_int) -> *mut c_void;

/// Factory creating a client-side temporary entity event
pub type CreateEventFn = unsafe extern "C" fn() -> *mut c_void;

/// One node of the client class list
///
/// Layout matches `ClientClass` from the Source SDK `client_class.h`.
#[repr(C)]
pub struct ClientClass {
    /// Entity factory (null for event-only classes)
    pub create_fn: Option<CreateClientClassFn>,
    /// Event factory (null for entity classes)
    pub create_event_fn: Option<CreateEventFn>,
    /// Class name, e.g. `CBasePlayer`
    pub network_name: *const c_char,
    /// Root receive table, e.g. `DT_BasePlayer`
    pub recv_table: *mut RecvTable,
    /// Next class in the list, null at the tail
    pub next: *mut ClientClass,
    /// Runtime class index
    pub class_id: c_int,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_class_field_order() {
        let ptr = std::mem::size_of::<*const c_void>();
        assert_eq!(std::mem::offset_of!(ClientClass, network_name), ptr * 2);
        assert_eq!(std::mem::offset_of!(ClientClass, recv_table), ptr * 3);
        assert_eq!(std::mem::offset_of!(ClientClass, next), ptr * 4);
        assert_eq!(std::mem::offset_of!(ClientClass, class_id), ptr * 5);
    }
}
