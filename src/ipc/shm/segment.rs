/*!
 * Shared Memory Region
 * A named POSIX shared memory object mapped into this process
 */

use super::types::ShmError;
use crate::core::limits::{SHM_MODE, SHM_NAME_PREFIX};
use crate::core::types::Size;
use nix::errno::Errno;
use nix::fcntl::OFlag;
use nix::libc;
use nix::sys::mman::{mmap, munmap, shm_open, shm_unlink, MapFlags, ProtFlags};
use nix::sys::stat::Mode;
use nix::unistd::ftruncate;
use std::ffi::c_void;
use std::num::NonZeroUsize;
use std::os::fd::OwnedFd;
use std::ptr::NonNull;
use tracing::{debug, warn};
use uuid::Uuid;

/// Unlinks the object name when dropped
#[derive(Debug)]
struct RegionName(String);

impl Drop for RegionName {
    fn drop(&mut self) {
        match shm_unlink(self.0.as_str()) {
            Ok(()) => debug!(name = %self.0, "unlinked shared memory object"),
            Err(Errno::ENOENT) => {}
            Err(e) => warn!(name = %self.0, error = %e, "failed to unlink shared memory object"),
        }
    }
}

/// Mapped shared memory object, unmapped and unlinked on drop
///
/// The name is registered with the OS only while this value lives, on every
/// exit path including failures part-way through `create`.
pub struct SharedRegion {
    ptr: NonNull<c_void>,
    len: NonZeroUsize,
    // Field order matters: the descriptor closes before the name is unlinked
    _fd: OwnedFd,
    name: RegionName,
}

// SAFETY: the mapping is owned exclusively by this value; all access goes
// through &self / &mut self.
unsafe impl Send for SharedRegion {}

impl SharedRegion {
    /// Name that cannot collide with other runs or processes
    pub fn unique_name() -> String {
        format!(
            "{}-{}-{}",
            SHM_NAME_PREFIX,
            std::process::id(),
            Uuid::new_v4().simple()
        )
    }

    /// Create a new object of exactly `size` bytes and map it read/write
    ///
    /// Fails if `name` already exists.
    pub fn create(name: &str, size: Size) -> Result<Self, ShmError> {
        let len = NonZeroUsize::new(size).ok_or(ShmError::InvalidSize(size))?;

        let fd = shm_open(
            name,
            OFlag::O_CREAT | OFlag::O_EXCL | OFlag::O_RDWR,
            Mode::from_bits_truncate(SHM_MODE as libc::mode_t),
        )
        .map_err(|errno| ShmError::Open {
            name: name.to_string(),
            errno,
        })?;
        let name = RegionName(name.to_string());

        ftruncate(&fd, size as libc::off_t).map_err(|errno| ShmError::Truncate {
            name: name.0.clone(),
            size,
            errno,
        })?;

        // SAFETY: fresh shared mapping of a descriptor we own; the object was
        // just sized to `len` bytes.
        let ptr = unsafe {
            mmap(
                None,
                len,
                ProtFlags::PROT_READ | ProtFlags::PROT_WRITE,
                MapFlags::MAP_SHARED,
                &fd,
                0,
            )
        }
        .map_err(|errno| ShmError::Map {
            name: name.0.clone(),
            errno,
        })?;

        debug!(name = %name.0, size, "created shared memory region");
        Ok(Self {
            ptr,
            len,
            _fd: fd,
            name,
        })
    }

    /// Whether `name` still resolves in the OS namespace
    pub fn exists(name: &str) -> bool {
        shm_open(name, OFlag::O_RDONLY, Mode::empty()).is_ok()
    }

    pub fn name(&self) -> &str {
        &self.name.0
    }

    pub fn len(&self) -> Size {
        self.len.get()
    }

    fn check_range(&self, offset: Size, size: Size) -> Result<(), ShmError> {
        match offset.checked_add(size) {
            Some(end) if end <= self.len() => Ok(()),
            _ => Err(ShmError::InvalidRange {
                offset,
                size,
                segment_size: self.len(),
            }),
        }
    }

    pub fn write(&mut self, offset: Size, data: &[u8]) -> Result<(), ShmError> {
        self.check_range(offset, data.len())?;

        // SAFETY: range checked against the mapping length above
        unsafe {
            let dst = self.ptr.as_ptr().cast::<u8>().add(offset);
            std::ptr::copy_nonoverlapping(data.as_ptr(), dst, data.len());
        }
        Ok(())
    }

    pub fn read(&self, offset: Size, size: Size) -> Result<Vec<u8>, ShmError> {
        self.check_range(offset, size)?;

        // SAFETY: range checked against the mapping length above
        let bytes = unsafe {
            let src = self.ptr.as_ptr().cast::<u8>().add(offset);
            std::slice::from_raw_parts(src, size)
        };
        Ok(bytes.to_vec())
    }
}

impl Drop for SharedRegion {
    fn drop(&mut self) {
        // SAFETY: ptr/len describe the mapping created in `create`, unmapped once
        if let Err(e) = unsafe { munmap(self.ptr, self.len.get()) } {
            warn!(name = %self.name.0, error = %e, "failed to unmap shared memory region");
        }
    }
}

impl std::fmt::Debug for SharedRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRegion")
            .field("name", &self.name.0)
            .field("address", &format_args!("{:p}", self.ptr))
            .field("len", &self.len)
            .finish()
    }
}
