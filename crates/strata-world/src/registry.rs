//! Per-object-type attribute registry consulted by culling and lighting.
//!
//! A fixed table of 4096 attribute records, written once during setup via
//! [`ObjectTypeRegistry::set_type`] / [`ObjectTypeRegistry::set_model`] and
//! read-only during gameplay. Type id 0 is air and is kept transparent and
//! non-blocking by construction.

use crate::error::WorldError;

/// Number of distinct object type ids (12-bit id space).
pub const MAX_OBJECT_TYPES: usize = 4096;

/// Maximum side length of a sub-voxel model.
pub const MAX_MODEL_DIM: u8 = 4;

/// Maximum number of block ids in a sub-voxel model (4³).
pub const MAX_MODEL_SIZE: usize =
    (MAX_MODEL_DIM as usize) * (MAX_MODEL_DIM as usize) * (MAX_MODEL_DIM as usize);

/// Attributes of one object type.
#[derive(Clone, Debug)]
pub struct ObjectAttr {
    /// Light and visibility pass through this type.
    pub transparent: bool,
    /// Entities collide with this type.
    pub blocking: bool,
    /// The type has a texture of its own.
    pub has_texture: bool,
    /// Changes to cells of this type trigger the active-cell notification.
    pub active: bool,
    /// The type carries a sub-voxel model.
    pub model: bool,
    /// Side length of the sub-voxel model, 0–4.
    pub model_dim: u8,
    /// UV texture coordinates.
    pub uv: [f64; 4],
    /// Dense sub-voxel model block ids; the first `model_dim³` entries are
    /// meaningful when `model` is set.
    pub model_blocks: [u32; MAX_MODEL_SIZE],
}

impl Default for ObjectAttr {
    fn default() -> Self {
        Self {
            transparent: false,
            blocking: false,
            has_texture: false,
            active: false,
            model: false,
            model_dim: 0,
            uv: [0.0; 4],
            model_blocks: [0; MAX_MODEL_SIZE],
        }
    }
}

/// Fixed table mapping type ids to [`ObjectAttr`] records.
pub struct ObjectTypeRegistry {
    attrs: Vec<ObjectAttr>,
}

impl ObjectTypeRegistry {
    /// Creates a registry with air (id 0) pre-configured as transparent.
    pub fn new() -> Self {
        let mut attrs = vec![ObjectAttr::default(); MAX_OBJECT_TYPES];
        attrs[0].transparent = true;
        Self { attrs }
    }

    /// Overwrites the full scalar attribute set for `id`.
    ///
    /// Model fields set by [`set_model`](Self::set_model) are left untouched.
    ///
    /// # Errors
    ///
    /// [`WorldError::TypeIdOutOfRange`] for ids ≥ 4096, and
    /// [`WorldError::ReservedAirType`] for attempts to make air opaque or
    /// blocking.
    pub fn set_type(
        &mut self,
        id: u16,
        transparent: bool,
        blocking: bool,
        has_texture: bool,
        active: bool,
        uv: [f64; 4],
    ) -> Result<(), WorldError> {
        if id == 0 && (!transparent || blocking) {
            return Err(WorldError::ReservedAirType);
        }
        let attr = self.attr_mut(id)?;
        attr.transparent = transparent;
        attr.blocking = blocking;
        attr.has_texture = has_texture;
        attr.active = active;
        attr.uv = uv;
        Ok(())
    }

    /// Marks `id` as model-bearing with the given dimension and copies up to
    /// `dim³` block ids.
    ///
    /// An empty block list still records the dimension and writes no block
    /// ids; extra entries beyond `dim³` are ignored.
    ///
    /// # Errors
    ///
    /// [`WorldError::TypeIdOutOfRange`] for ids ≥ 4096 and
    /// [`WorldError::ModelDimOutOfRange`] for `dim > 4`.
    pub fn set_model(&mut self, id: u16, dim: u8, blocks: &[u32]) -> Result<(), WorldError> {
        if dim > MAX_MODEL_DIM {
            return Err(WorldError::ModelDimOutOfRange(dim));
        }
        let attr = self.attr_mut(id)?;
        attr.model = true;
        attr.model_dim = dim;

        let wanted = (dim as usize).pow(3);
        for (slot, &block) in attr.model_blocks.iter_mut().zip(blocks).take(wanted) {
            *slot = block;
        }
        Ok(())
    }

    /// Returns a read-only view of the attributes for `id`.
    ///
    /// # Errors
    ///
    /// [`WorldError::TypeIdOutOfRange`] for ids ≥ 4096.
    pub fn get(&self, id: u16) -> Result<&ObjectAttr, WorldError> {
        self.attrs
            .get(id as usize)
            .ok_or(WorldError::TypeIdOutOfRange(id))
    }

    /// Returns `true` if light and visibility pass through the given type.
    ///
    /// Ids outside the table are treated as air (transparent); decoded cells
    /// can never carry one, since the wire format stores 12 bits.
    pub fn is_transparent(&self, id: u16) -> bool {
        self.attrs.get(id as usize).map_or(true, |a| a.transparent)
    }

    /// Returns `true` if cells of the given type trigger the active-cell
    /// notification on change.
    pub fn is_active(&self, id: u16) -> bool {
        self.attrs.get(id as usize).is_some_and(|a| a.active)
    }

    fn attr_mut(&mut self, id: u16) -> Result<&mut ObjectAttr, WorldError> {
        self.attrs
            .get_mut(id as usize)
            .ok_or(WorldError::TypeIdOutOfRange(id))
    }
}

impl Default for ObjectTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
