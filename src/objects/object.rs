use crate::objects::object_id::ObjectId;
use crate::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;

/// Capability set shared by the three object kinds.
///
/// `serialize` produces the canonical content bytes used both for hashing
/// and for storage; it is a pure function of the object's fields and does
/// no I/O. The identifier slot starts unset and is assigned exactly once
/// by the database when the object is persisted; reading it earlier fails
/// with [`crate::errors::ObjectError::OidUnassigned`].
pub trait Object {
    fn object_type(&self) -> ObjectType;

    fn serialize(&self) -> Result<Bytes>;

    fn oid(&self) -> Result<&ObjectId>;

    fn set_oid(&mut self, oid: ObjectId) -> Result<()>;
}

/// Read a set-once identifier slot, failing loudly while unset.
pub(crate) fn read_oid_slot(slot: &Option<ObjectId>) -> Result<&ObjectId> {
    slot.as_ref()
        .ok_or_else(|| crate::errors::ObjectError::OidUnassigned.into())
}

/// Fill a set-once identifier slot, failing loudly on reassignment.
pub(crate) fn fill_oid_slot(slot: &mut Option<ObjectId>, oid: ObjectId) -> Result<()> {
    if slot.is_some() {
        return Err(crate::errors::ObjectError::OidReassigned.into());
    }
    *slot = Some(oid);
    Ok(())
}
