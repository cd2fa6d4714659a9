/*!
 * Pipe Writer
 * Child side of the pipe demo
 */

use std::io::{self, Write};

/// Write the whole payload and flush; the caller exits right after
pub fn write_payload<W: Write>(out: &mut W, payload: &str) -> io::Result<usize> {
    out.write_all(payload.as_bytes())?;
    out.flush()?;
    Ok(payload.len())
}
