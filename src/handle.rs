//! Process-wide validator handle for host bindings.
//!
//! Host environments that want a single validator per process use this
//! explicit `initialize` / `validate` / `reset` triple. The grid is bound
//! exactly once; binding a second grid without [`reset`] is an error rather
//! than a silent rebind, because callers of [`validate`] must be able to
//! rely on the grid never changing underneath them.
//!
//! Library users should prefer owning a [`PathValidator`] directly.

use parking_lot::Mutex;

use crate::geom::WorldPoint;
use crate::validate::{PathValidator, Verdict};
use crate::{GridError, Result};

static VALIDATOR: Mutex<Option<PathValidator>> = Mutex::new(None);

/// Bind the process-wide validator to a grid.
pub fn initialize(cells: &[bool], width: usize, height: usize) -> Result<()> {
    let mut slot = VALIDATOR.lock();
    if slot.is_some() {
        return Err(GridError::AlreadyInitialized);
    }
    *slot = Some(PathValidator::new(cells, width, height)?);
    Ok(())
}

/// Validate a path against the bound grid.
pub fn validate(path: &[WorldPoint]) -> Result<Verdict> {
    let slot = VALIDATOR.lock();
    let validator = slot.as_ref().ok_or(GridError::NotInitialized)?;
    Ok(validator.validate(path))
}

/// Drop the bound grid so a new one may be bound.
pub fn reset() {
    VALIDATOR.lock().take();
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test drives the whole lifecycle: the handle is process-global, so
    // parallel test functions would race on it.
    #[test]
    fn test_handle_lifecycle() {
        reset();
        assert_eq!(
            validate(&[]).unwrap_err(),
            GridError::NotInitialized,
            "validation before initialize must fail"
        );

        let cells = [true, true, false, true];
        initialize(&cells, 2, 2).unwrap();
        let path = [WorldPoint::new(0.5, 0.5), WorldPoint::new(1.5, 0.5)];
        assert_eq!(validate(&path).unwrap(), Verdict::Valid);

        assert_eq!(
            initialize(&cells, 2, 2).unwrap_err(),
            GridError::AlreadyInitialized,
            "rebinding without reset must fail"
        );

        reset();
        initialize(&cells, 2, 2).unwrap();
        assert_eq!(validate(&path).unwrap(), Verdict::Valid);
        reset();
    }
}
