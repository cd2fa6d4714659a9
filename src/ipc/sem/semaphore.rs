/*!
 * Named Semaphore
 * POSIX counting semaphore with a bounded permit count
 *
 * Permits are handed out as guards: a permit posts back exactly once,
 * either through `release` or on drop.
 *
 * The name is unlinked as soon as the semaphore is created. The open handle
 * stays usable, and nothing is left in /dev/shm even if the process exits
 * without running destructors.
 */

use super::types::SemaphoreError;
use crate::core::limits::{SEM_MODE, SEM_NAME_PREFIX};
use crate::core::timeout::TimeoutPolicy;
use nix::errno::Errno;
use nix::libc;
use std::ffi::CString;
use std::ptr::NonNull;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

/// Named semaphore whose name only exists during `create`; closed on drop
pub struct NamedSemaphore {
    handle: NonNull<libc::sem_t>,
    name: String,
    c_name: CString,
    max_permits: u32,
}

// SAFETY: POSIX semaphore operations are thread-safe; the handle stays valid
// until drop.
unsafe impl Send for NamedSemaphore {}
unsafe impl Sync for NamedSemaphore {}

impl NamedSemaphore {
    /// Name that cannot collide with other runs or processes
    pub fn unique_name() -> String {
        format!(
            "{}-{}-{}",
            SEM_NAME_PREFIX,
            std::process::id(),
            Uuid::new_v4().simple()
        )
    }

    /// Create a new semaphore and release its name; fails if `name` already exists
    pub fn create(name: &str, initial: u32, max_permits: u32) -> Result<Self, SemaphoreError> {
        if initial > max_permits {
            return Err(SemaphoreError::InvalidInitial {
                initial,
                max: max_permits,
            });
        }
        let c_name =
            CString::new(name).map_err(|_| SemaphoreError::InvalidName(name.to_string()))?;

        // SAFETY: valid C string; O_CREAT takes mode and initial value as varargs
        let raw = unsafe {
            libc::sem_open(
                c_name.as_ptr(),
                libc::O_CREAT | libc::O_EXCL,
                SEM_MODE as libc::c_uint,
                initial as libc::c_uint,
            )
        };
        if raw == libc::SEM_FAILED {
            return Err(SemaphoreError::Open {
                name: name.to_string(),
                errno: Errno::last(),
            });
        }
        let handle = NonNull::new(raw).ok_or_else(|| SemaphoreError::Open {
            name: name.to_string(),
            errno: Errno::EINVAL,
        })?;

        // SAFETY: valid C string; the open handle outlives the name
        if unsafe { libc::sem_unlink(c_name.as_ptr()) } != 0 {
            let errno = Errno::last();
            // SAFETY: raw came from the successful sem_open above
            unsafe { libc::sem_close(raw) };
            return Err(SemaphoreError::Unlink {
                name: name.to_string(),
                errno,
            });
        }

        debug!(name, initial, max_permits, "created semaphore");
        Ok(Self {
            handle,
            name: name.to_string(),
            c_name,
            max_permits,
        })
    }

    /// Whether `name` still resolves in the OS namespace
    pub fn exists(name: &str) -> bool {
        let Ok(c_name) = CString::new(name) else {
            return false;
        };
        // SAFETY: valid C string, no O_CREAT so no varargs
        let raw = unsafe { libc::sem_open(c_name.as_ptr(), 0) };
        if raw == libc::SEM_FAILED {
            return false;
        }
        // SAFETY: raw came from a successful sem_open
        unsafe { libc::sem_close(raw) };
        true
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current permit count
    pub fn value(&self) -> Result<u32, SemaphoreError> {
        let mut value: libc::c_int = 0;
        // SAFETY: handle is valid until drop
        if unsafe { libc::sem_getvalue(self.handle.as_ptr(), &mut value) } != 0 {
            return Err(SemaphoreError::Value(Errno::last()));
        }
        Ok(value.max(0) as u32)
    }

    /// Take one permit, blocking up to `timeout`
    pub fn acquire(&self, timeout: TimeoutPolicy) -> Result<SemaphorePermit<'_>, SemaphoreError> {
        let start = Instant::now();
        match timeout.duration() {
            None => self.wait_unbounded()?,
            Some(limit) => self.wait_until(realtime_deadline(limit), timeout, start)?,
        }

        debug!(name = %self.name, "semaphore acquired");
        Ok(SemaphorePermit {
            semaphore: self,
            released: false,
        })
    }

    fn wait_unbounded(&self) -> Result<(), SemaphoreError> {
        loop {
            // SAFETY: handle is valid until drop
            if unsafe { libc::sem_wait(self.handle.as_ptr()) } == 0 {
                return Ok(());
            }
            match Errno::last() {
                Errno::EINTR => continue,
                errno => return Err(SemaphoreError::Wait(errno)),
            }
        }
    }

    fn wait_until(
        &self,
        deadline: libc::timespec,
        policy: TimeoutPolicy,
        start: Instant,
    ) -> Result<(), SemaphoreError> {
        loop {
            // SAFETY: handle is valid until drop, deadline is a plain timespec
            if unsafe { libc::sem_timedwait(self.handle.as_ptr(), &deadline) } == 0 {
                return Ok(());
            }
            match Errno::last() {
                Errno::EINTR => continue,
                Errno::ETIMEDOUT => {
                    return Err(SemaphoreError::Timeout(policy.elapsed_error(start)))
                }
                errno => return Err(SemaphoreError::Wait(errno)),
            }
        }
    }

    /// Give one permit back, refusing to exceed the maximum
    fn post(&self) -> Result<(), SemaphoreError> {
        let value = self.value()?;
        if value >= self.max_permits {
            return Err(SemaphoreError::OverRelease {
                value,
                max: self.max_permits,
            });
        }
        // SAFETY: handle is valid until drop
        if unsafe { libc::sem_post(self.handle.as_ptr()) } != 0 {
            return Err(SemaphoreError::Post(Errno::last()));
        }
        debug!(name = %self.name, "semaphore released");
        Ok(())
    }
}

impl Drop for NamedSemaphore {
    fn drop(&mut self) {
        // SAFETY: handle came from sem_open and is closed exactly once here
        unsafe {
            if libc::sem_close(self.handle.as_ptr()) != 0 {
                warn!(name = %self.name, error = %Errno::last(), "failed to close semaphore");
            }
            // Normally already gone since `create`
            if libc::sem_unlink(self.c_name.as_ptr()) != 0 {
                match Errno::last() {
                    Errno::ENOENT => {}
                    errno => warn!(name = %self.name, error = %errno, "failed to unlink semaphore"),
                }
            }
        }
    }
}

impl std::fmt::Debug for NamedSemaphore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedSemaphore")
            .field("name", &self.name)
            .field("value", &self.value().ok())
            .field("max_permits", &self.max_permits)
            .finish()
    }
}

/// One held permit
#[must_use = "dropping a permit releases it immediately"]
pub struct SemaphorePermit<'a> {
    semaphore: &'a NamedSemaphore,
    released: bool,
}

impl SemaphorePermit<'_> {
    /// Give the permit back, surfacing release errors
    pub fn release(mut self) -> Result<(), SemaphoreError> {
        self.released = true;
        self.semaphore.post()
    }
}

impl Drop for SemaphorePermit<'_> {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = self.semaphore.post() {
                warn!(name = %self.semaphore.name, error = %e, "permit release on drop failed");
            }
        }
    }
}

/// CLOCK_REALTIME now + `after`, as sem_timedwait expects
fn realtime_deadline(after: Duration) -> libc::timespec {
    const NANOS_PER_SEC: i64 = 1_000_000_000;

    // SAFETY: timespec is plain old data
    let mut now: libc::timespec = unsafe { std::mem::zeroed() };
    // SAFETY: valid out pointer; CLOCK_REALTIME always exists
    unsafe { libc::clock_gettime(libc::CLOCK_REALTIME, &mut now) };

    let nanos = now.tv_nsec as i64 + after.subsec_nanos() as i64;
    let mut deadline = now;
    deadline.tv_sec = now.tv_sec
        + after.as_secs() as libc::time_t
        + (nanos / NANOS_PER_SEC) as libc::time_t;
    deadline.tv_nsec = (nanos % NANOS_PER_SEC) as _;
    deadline
}
