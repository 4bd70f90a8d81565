//! # Vertex Buffer Staging
//!
//! Every model's mesh is uploaded once when the world is built and the
//! resulting [`BufferHandle`] is stored on the [`Model`] itself. Drawing
//! looks the handle up on the model, so the order in which the scene is
//! traversed has no bearing on which buffer is bound.
//!
//! [`BufferAllocator`] is the seam to a graphics backend. [`StagingBuffers`]
//! keeps the bytes in CPU memory.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};
use thiserror::Error;

use super::group::{Model, World};
use super::vertex::Vertex3D;
use crate::gfx::geometry::Mesh;

/// Opaque handle to an uploaded vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferHandle(pub u32);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("vertex buffer budget exhausted: {requested} bytes requested, {available} available")]
    BudgetExhausted { requested: usize, available: usize },
    #[error("too many vertex buffers")]
    TooManyBuffers,
}

/// Receives vertex data and hands back a handle to it.
pub trait BufferAllocator {
    fn allocate(&mut self, label: &str, vertices: &[Vertex3D]) -> Result<BufferHandle, BufferError>;
}

/// A vertex buffer kept in CPU memory.
#[derive(Debug, Clone)]
pub struct StagedBuffer {
    pub label: String,
    pub vertex_count: usize,
    pub bytes: Vec<u8>,
}

/// CPU-side [`BufferAllocator`] with an optional byte budget.
#[derive(Debug, Default)]
pub struct StagingBuffers {
    buffers: Vec<StagedBuffer>,
    used_bytes: usize,
    budget: Option<usize>,
}

impl StagingBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(bytes: usize) -> Self {
        Self {
            budget: Some(bytes),
            ..Self::default()
        }
    }

    pub fn get(&self, handle: BufferHandle) -> Option<&StagedBuffer> {
        self.buffers.get(handle.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }
}

impl BufferAllocator for StagingBuffers {
    fn allocate(&mut self, label: &str, vertices: &[Vertex3D]) -> Result<BufferHandle, BufferError> {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        if let Some(budget) = self.budget {
            let available = budget.saturating_sub(self.used_bytes);
            if bytes.len() > available {
                return Err(BufferError::BudgetExhausted {
                    requested: bytes.len(),
                    available,
                });
            }
        }
        let index = u32::try_from(self.buffers.len()).map_err(|_| BufferError::TooManyBuffers)?;

        self.used_bytes += bytes.len();
        self.buffers.push(StagedBuffer {
            label: label.to_string(),
            vertex_count: vertices.len(),
            bytes: bytes.to_vec(),
        });
        debug!("Staged buffer {} '{}' ({} vertices)", index, label, vertices.len());
        Ok(BufferHandle(index))
    }
}

/// Outcome of [`World::upload_buffers`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UploadSummary {
    /// Distinct meshes sent to the allocator.
    pub uploaded: usize,
    /// Models that reused the buffer of an identical shared mesh.
    pub reused: usize,
}

impl World {
    /// Uploads every model's mesh and stores the handle on the model.
    ///
    /// Models sharing one `Arc<Mesh>` share one buffer, including meshes
    /// bound by an earlier call. Models that already carry a handle are left
    /// alone. Handles are written only once every upload has succeeded, so on
    /// error no model changes; buffers the allocator accepted before the
    /// failure stay with the allocator.
    pub fn upload_buffers(&mut self, allocator: &mut impl BufferAllocator) -> Result<UploadSummary, BufferError> {
        let mut seen: HashMap<*const Mesh, BufferHandle> = HashMap::new();
        self.root.for_each(&mut |group| {
            for model in &group.models {
                if let Some(handle) = model.buffer {
                    seen.entry(Arc::as_ptr(&model.mesh)).or_insert(handle);
                }
            }
        });

        let mut summary = UploadSummary::default();
        let mut planned = Vec::new();
        let mut result = Ok(());
        self.root.for_each(&mut |group| {
            for model in &group.models {
                if result.is_err() {
                    return;
                }
                match plan_model(model, &mut *allocator, &mut seen, &mut summary) {
                    Ok(handle) => planned.push(handle),
                    Err(e) => result = Err(e),
                }
            }
        });
        result?;

        // same pre-order walk as above
        let mut planned = planned.into_iter();
        self.root.for_each_mut(&mut |group| {
            for model in &mut group.models {
                if let Some(Some(handle)) = planned.next() {
                    model.buffer = Some(handle);
                }
            }
        });

        info!(
            "Uploaded {} vertex buffers ({} models reuse a shared mesh)",
            summary.uploaded, summary.reused
        );
        Ok(summary)
    }
}

/// Handle `model` should receive, or `None` if it is already bound.
fn plan_model(
    model: &Model,
    allocator: &mut impl BufferAllocator,
    seen: &mut HashMap<*const Mesh, BufferHandle>,
    summary: &mut UploadSummary,
) -> Result<Option<BufferHandle>, BufferError> {
    if model.buffer.is_some() {
        return Ok(None);
    }
    let key = Arc::as_ptr(&model.mesh);
    if let Some(&handle) = seen.get(&key) {
        summary.reused += 1;
        return Ok(Some(handle));
    }
    let handle = allocator.allocate(&model.name, &Vertex3D::interleave(&model.mesh))?;
    seen.insert(key, handle);
    summary.uploaded += 1;
    Ok(Some(handle))
}
