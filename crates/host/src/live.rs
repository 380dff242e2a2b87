//! Live client class list traversal
//!
//! Walks the `ClientClass` list and `RecvTable` trees of a loaded client
//! module in place. Names are read with `to_string_lossy`, so odd bytes never
//! abort the walk.

use std::borrow::Cow;
use std::ffi::{c_char, CStr};
use std::marker::PhantomData;
use std::ptr::NonNull;

use tracing::{trace, warn};

use netvars_sdk::{ClientClass, RecvTable};

use crate::error::HostError;
use crate::source::{HostClass, HostClassSource, HostProp, HostTable};

/// Read a NUL-terminated name, or `None` for a null pointer
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`
unsafe fn read_name<'a>(ptr: *const c_char) -> Option<Cow<'a, str>> {
    if ptr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(ptr).to_string_lossy())
}

/// Handle to a `RecvTable` in host memory
#[derive(Clone, Copy, Debug)]
pub struct LiveTable {
    ptr: NonNull<RecvTable>,
}

impl LiveTable {
    /// Wrap a raw table pointer, returning `None` for null
    ///
    /// # Safety
    /// A non-null `ptr` must point to a valid `RecvTable` whose props, names
    /// and nested tables stay valid and unmodified for as long as the handle
    /// (or anything derived from it) is used.
    pub unsafe fn from_raw(ptr: *mut RecvTable) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr })
    }

    /// Get the raw table pointer
    pub fn as_ptr(&self) -> *mut RecvTable {
        self.ptr.as_ptr()
    }

    fn table(&self) -> &RecvTable {
        // SAFETY: validity is the contract of `from_raw`
        unsafe { self.ptr.as_ref() }
    }
}

impl HostTable for LiveTable {
    fn name(&self) -> Cow<'_, str> {
        unsafe { read_name(self.table().net_table_name) }.unwrap_or(Cow::Borrowed(""))
    }

    fn props(&self) -> impl Iterator<Item = HostProp<'_, Self>> + '_ {
        let props = unsafe { self.table().props_slice() };

        props.iter().enumerate().filter_map(move |(index, prop)| {
            let Some(name) = (unsafe { read_name(prop.var_name) }) else {
                trace!("Skipping unnamed prop #{} in {}", index, self.name());
                return None;
            };

            Some(HostProp {
                name,
                offset: prop.offset,
                data_table: unsafe { LiveTable::from_raw(prop.data_table) },
            })
        })
    }
}

/// The client module's `ClientClass` list
pub struct LiveClassList {
    head: NonNull<ClientClass>,
}

impl LiveClassList {
    /// Wrap the head of the class list (`IBaseClientDLL::GetAllClasses`)
    ///
    /// # Safety
    /// `head` must point to a valid, null-terminated `ClientClass` list whose
    /// nodes and tables satisfy the contract of [`LiveTable::from_raw`].
    pub unsafe fn from_raw(head: *mut ClientClass) -> Result<Self, HostError> {
        NonNull::new(head)
            .map(|head| Self { head })
            .ok_or(HostError::NullPointer("client class list head"))
    }

    /// Iterate the raw list nodes
    pub fn iter(&self) -> ClientClassIter<'_> {
        ClientClassIter {
            next: self.head.as_ptr(),
            _marker: PhantomData,
        }
    }
}

impl HostClassSource for LiveClassList {
    type Table<'a> = LiveTable
    where
        Self: 'a;

    fn classes(&self) -> impl Iterator<Item = HostClass<'_, Self::Table<'_>>> + '_ {
        self.iter().filter_map(|node| {
            let Some(name) = (unsafe { read_name(node.network_name) }) else {
                warn!("Skipping unnamed client class (id={})", node.class_id);
                return None;
            };

            let Some(table) = (unsafe { LiveTable::from_raw(node.recv_table) }) else {
                warn!("Client class {} has no receive table", name);
                return None;
            };

            Some(HostClass { name, table })
        })
    }
}

/// Iterator over `ClientClass` nodes
pub struct ClientClassIter<'a> {
    next: *mut ClientClass,
    _marker: PhantomData<&'a ClientClass>,
}

impl<'a> Iterator for ClientClassIter<'a> {
    type Item = &'a ClientClass;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: nodes are valid per `LiveClassList::from_raw`
        let node = unsafe { self.next.as_ref() }?;
        self.next = node.next;
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::ffi::CString;

    use netvars_sdk::{RecvProp, SendPropType};

    fn prop(name: &CString, offset: i32, data_table: *mut RecvTable) -> RecvProp {
        RecvProp {
            var_name: name.as_ptr(),
            recv_type: if data_table.is_null() {
                SendPropType::Int as i32
            } else {
                SendPropType::DataTable as i32
            },
            flags: 0,
            string_buffer_size: 0,
            inside_array: false,
            extra_data: std::ptr::null(),
            array_prop: std::ptr::null_mut(),
            array_length_proxy: None,
            proxy_fn: None,
            data_table_proxy_fn: None,
            data_table,
            offset,
            element_stride: 0,
            elements: 1,
            parent_array_prop_name: std::ptr::null(),
        }
    }

    fn table(name: &CString, props: &mut [RecvProp]) -> RecvTable {
        RecvTable {
            props: props.as_mut_ptr(),
            prop_count: props.len() as i32,
            decoder: std::ptr::null_mut(),
            net_table_name: name.as_ptr(),
            initialized: true,
            in_main_list: true,
        }
    }

    #[test]
    fn test_null_head_is_rejected() {
        let result = unsafe { LiveClassList::from_raw(std::ptr::null_mut()) };
        assert!(matches!(result, Err(HostError::NullPointer(_))));
    }

    #[test]
    fn test_walks_classes_and_nested_tables() {
        let velocity = CString::new("m_vecVelocity").unwrap();
        let local_name = CString::new("DT_Local").unwrap();
        let mut local_props = [prop(&velocity, 12, std::ptr::null_mut())];
        let mut local = table(&local_name, &mut local_props);

        let health = CString::new("m_iHealth").unwrap();
        let local_prop = CString::new("m_Local").unwrap();
        let player_table_name = CString::new("DT_BasePlayer").unwrap();
        let mut player_props = [
            prop(&health, 4, std::ptr::null_mut()),
            prop(&local_prop, 20, &mut local),
        ];
        let mut player_table = table(&player_table_name, &mut player_props);

        let world_table_name = CString::new("DT_World").unwrap();
        let mut world_table = table(&world_table_name, &mut []);

        let world_name = CString::new("CWorld").unwrap();
        let mut world = ClientClass {
            create_fn: None,
            create_event_fn: None,
            network_name: world_name.as_ptr(),
            recv_table: &mut world_table,
            next: std::ptr::null_mut(),
            class_id: 1,
        };
        let player_name = CString::new("CBasePlayer").unwrap();
        let mut player = ClientClass {
            create_fn: None,
            create_event_fn: None,
            network_name: player_name.as_ptr(),
            recv_table: &mut player_table,
            next: &mut world,
            class_id: 0,
        };

        let list = unsafe { LiveClassList::from_raw(&mut player) }.unwrap();
        let classes: Vec<_> = list.classes().collect();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].name, "CBasePlayer");
        assert_eq!(classes[1].name, "CWorld");
        assert_eq!(classes[0].table.name(), "DT_BasePlayer");

        let props: Vec<_> = classes[0].table.props().collect();
        assert_eq!(props.len(), 2);
        assert_eq!(props[0].name, "m_iHealth");
        assert_eq!(props[0].offset, 4);
        assert!(props[0].data_table.is_none());

        let nested = props[1].data_table.expect("m_Local has a data table");
        assert_eq!(nested.name(), "DT_Local");
        let nested_props: Vec<_> = nested.props().collect();
        assert_eq!(nested_props[0].name, "m_vecVelocity");
        assert_eq!(nested_props[0].offset, 12);
    }

    #[test]
    fn test_skips_unnamed_props_and_tableless_classes() {
        let named = CString::new("m_fFlags").unwrap();
        let mut props = [prop(&named, 8, std::ptr::null_mut())];
        props[0].var_name = std::ptr::null();
        let table_name = CString::new("DT_Empty").unwrap();
        let t = table(&table_name, &mut props);
        let live = unsafe { LiveTable::from_raw(&t as *const RecvTable as *mut RecvTable) }.unwrap();
        assert_eq!(live.props().count(), 0);

        let class_name = CString::new("CEventOnly").unwrap();
        let mut event_only = ClientClass {
            create_fn: None,
            create_event_fn: None,
            network_name: class_name.as_ptr(),
            recv_table: std::ptr::null_mut(),
            next: std::ptr::null_mut(),
            class_id: 7,
        };
        let list = unsafe { LiveClassList::from_raw(&mut event_only) }.unwrap();
        assert_eq!(list.iter().count(), 1);
        assert_eq!(list.classes().count(), 0);
    }
}
