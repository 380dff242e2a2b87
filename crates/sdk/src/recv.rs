//! Receive table definitions
//!
//! A `RecvTable` is the client-side description of a networked data table.
//! Each `RecvProp` names one field and its byte offset relative to the table
//! that declares it. Props of type [`SendPropType::DataTable`] point at a
//! nested `RecvTable`.

use std::ffi::{c_char, c_int, c_void};

/// Wire type of a networked property
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendPropType {
    Int = 0,
    Float,
    Vector,
    VectorXY,
    String,
    Array,
    DataTable,
    Int64,
}

impl SendPropType {
    /// Convert a raw wire type, returning `None` for unknown values
    pub fn from_raw(raw: c_int) -> Option<Self> {
        Some(match raw {
            0 => Self::Int,
            1 => Self::Float,
            2 => Self::Vector,
            3 => Self::VectorXY,
            4 => Self::String,
            5 => Self::Array,
            6 => Self::DataTable,
            7 => Self::Int64,
            _ => return None,
        })
    }
}

/// Opaque type for CRecvDecoder
/// Engine-internal decoder attached to initialized tables
#[repr(C)]
pub struct CRecvDecoder {
    _opaque: [u8; 0],
}

/// Receive-side value proxy
pub type RecvVarProxyFn =
    unsafe extern "C" fn(data: *const c_void, structure: *mut c_void, out: *mut c_void);

/// Receive-side array length proxy
pub type ArrayLengthRecvProxyFn =
    unsafe extern "C" fn(structure: *mut c_void, object_id: c_int, current_array_length: c_int);

/// Receive-side data table proxy
pub type DataTableRecvVarProxyFn = unsafe extern "C" fn(
    prop: *const RecvProp,
    out: *mut *mut c_void,
    data: *mut c_void,
    object_id: c_int,
);

/// One networked property
///
/// Layout matches `RecvProp` from the Source SDK `dt_recv.h`.
#[repr(C)]
pub struct RecvProp {
    /// Property name, e.g. `m_iHealth`
    pub var_name: *const c_char,
    /// Raw [`SendPropType`] value
    pub recv_type: c_int,
    pub flags: c_int,
    pub string_buffer_size: c_int,
    pub inside_array: bool,
    pub extra_data: *const c_void,
    pub array_prop: *mut RecvProp,
    pub array_length_proxy: Option<ArrayLengthRecvProxyFn>,
    pub proxy_fn: Option<RecvVarProxyFn>,
    pub data_table_proxy_fn: Option<DataTableRecvVarProxyFn>,
    /// Nested table for `DataTable` props, null otherwise
    pub data_table: *mut RecvTable,
    /// Byte offset relative to the declaring table
    pub offset: c_int,
    pub element_stride: c_int,
    pub elements: c_int,
    pub parent_array_prop_name: *const c_char,
}

/// A networked data table
///
/// Layout matches `RecvTable` from the Source SDK `dt_recv.h`.
#[repr(C)]
pub struct RecvTable {
    /// Contiguous array of `prop_count` props
    pub props: *mut RecvProp,
    pub prop_count: c_int,
    pub decoder: *mut CRecvDecoder,
    /// Table name, e.g. `DT_BasePlayer`
    pub net_table_name: *const c_char,
    pub initialized: bool,
    pub in_main_list: bool,
}

impl RecvProp {
    /// Decoded wire type
    pub fn prop_type(&self) -> Option<SendPropType> {
        SendPropType::from_raw(self.recv_type)
    }
}

impl RecvTable {
    /// View the prop array as a slice
    ///
    /// # Safety
    /// `props` must point to `prop_count` valid, initialized `RecvProp`s that
    /// outlive the returned slice.
    pub unsafe fn props_slice(&self) -> &[RecvProp] {
        if self.props.is_null() || self.prop_count <= 0 {
            return &[];
        }
        std::slice::from_raw_parts(self.props, self.prop_count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_props_slice_empty_when_null() {
        let table = RecvTable {
            props: std::ptr::null_mut(),
            prop_count: 3,
            decoder: std::ptr::null_mut(),
            net_table_name: std::ptr::null(),
            initialized: false,
            in_main_list: false,
        };
        assert!(unsafe { table.props_slice() }.is_empty());
    }

    #[test]
    fn test_send_prop_type_from_raw() {
        assert_eq!(SendPropType::from_raw(0), Some(SendPropType::Int));
        assert_eq!(SendPropType::from_raw(6), Some(SendPropType::DataTable));
        assert_eq!(SendPropType::from_raw(7), Some(SendPropType::Int64));
        assert_eq!(SendPropType::from_raw(42), None);
        assert_eq!(SendPropType::DataTable as c_int, 6);
    }
}
