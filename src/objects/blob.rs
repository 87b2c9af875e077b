use crate::objects::object::{self, Object};
use crate::objects::object_id::ObjectId;
use crate::objects::object_type::ObjectType;
use bytes::Bytes;

/// Raw file content, stored verbatim.
#[derive(Debug, Clone)]
pub struct Blob {
    data: Bytes,
    oid: Option<ObjectId>,
}

impl Blob {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Blob {
            data: data.into(),
            oid: None,
        }
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(self.data.clone())
    }

    fn oid(&self) -> anyhow::Result<&ObjectId> {
        object::read_oid_slot(&self.oid)
    }

    fn set_oid(&mut self, oid: ObjectId) -> anyhow::Result<()> {
        object::fill_oid_slot(&mut self.oid, oid)
    }
}
