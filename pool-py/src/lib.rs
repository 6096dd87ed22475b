//! Python bindings for the pool-core physics engine.
//!
//! Provides a simple Python API:
//!
//! ```python
//! from pool_physics import World
//!
//! world = World()
//! world.add_table_cushions()
//! cue = world.add_ball(300.0, 360.0)
//! world.apply_impulse(cue, 1200.0, 0.0)
//!
//! while not world.is_settled():
//!     world.step()
//!     x, y = world.body_position(cue).to_tuple()
//! ```
//!
//! Bodies are referred to by integer ids (packed arena handles). An id that
//! outlived its body raises `KeyError`.

use pyo3::exceptions::{PyKeyError, PyOSError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use pool_core::config::{load_world_file, ConfigError};
use pool_core::types::constants;
use pool_core::{
    Body, BodyHandle, BodyMaterial, BodyTag, PhysicsWorld, Vec2 as CoreVec2, WorldConfig,
};

/// 2D vector for positions and velocities.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec2 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
}

#[pymethods]
impl Vec2 {
    #[new]
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn __repr__(&self) -> String {
        format!("Vec2({:.4}, {:.4})", self.x, self.y)
    }

    fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    fn to_tuple(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<CoreVec2> for Vec2 {
    fn from(v: CoreVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vec2> for CoreVec2 {
    fn from(v: Vec2) -> Self {
        CoreVec2::new(v.x, v.y)
    }
}

fn config_err(err: ConfigError) -> PyErr {
    match err {
        ConfigError::Io(e) => PyOSError::new_err(e.to_string()),
        ConfigError::NotFound(name) => PyOSError::new_err(format!("config not found: {}", name)),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Pool table simulation.
///
/// Wraps a `PhysicsWorld`; rendering, input and game rules stay in Python.
#[pyclass(unsendable)]
pub struct World {
    inner: PhysicsWorld,
}

impl World {
    fn body(&self, id: u64) -> PyResult<&Body> {
        self.inner
            .body(BodyHandle::from_bits(id))
            .ok_or_else(|| PyKeyError::new_err(format!("no body with id {}", id)))
    }

    fn handle(&self, id: u64) -> PyResult<BodyHandle> {
        self.body(id).map(|_| BodyHandle::from_bits(id))
    }
}

#[pymethods]
impl World {
    /// Create a world with pool table defaults, optionally overriding the
    /// substep count or gravity.
    #[new]
    #[pyo3(signature = (substeps=None, gravity_x=0.0, gravity_y=0.0))]
    fn new(substeps: Option<u32>, gravity_x: f64, gravity_y: f64) -> PyResult<Self> {
        let mut config = WorldConfig::default();
        if let Some(substeps) = substeps {
            config.substeps = substeps;
        }
        config.gravity = CoreVec2::new(gravity_x, gravity_y);
        let inner = PhysicsWorld::try_new(config).map_err(config_err)?;
        Ok(Self { inner })
    }

    /// Load a world configuration from a YAML file.
    #[staticmethod]
    fn from_yaml(path: &str) -> PyResult<Self> {
        let config = load_world_file(path).map_err(config_err)?;
        let inner = PhysicsWorld::try_new(config).map_err(config_err)?;
        Ok(Self { inner })
    }

    /// Simulated time in seconds.
    #[getter]
    fn time(&self) -> f64 {
        self.inner.time()
    }

    #[getter]
    fn frame(&self) -> u64 {
        self.inner.frame()
    }

    #[getter]
    fn body_count(&self) -> usize {
        self.inner.body_count()
    }

    /// Add a ball and return its id.
    ///
    /// Defaults match a standard pool ball. `number` tags the ball for game
    /// rules; 0 marks the cue ball.
    #[pyo3(signature = (x, y, radius=None, mass=None, restitution=None, friction=None, number=None))]
    #[allow(clippy::too_many_arguments)]
    fn add_ball(
        &mut self,
        x: f64,
        y: f64,
        radius: Option<f64>,
        mass: Option<f64>,
        restitution: Option<f64>,
        friction: Option<f64>,
        number: Option<u8>,
    ) -> u64 {
        let preset = BodyMaterial::pool_ball();
        let mut body = Body::new(
            CoreVec2::new(x, y),
            radius.unwrap_or(preset.radius),
            mass.unwrap_or(preset.mass),
        )
        .with_restitution(restitution.unwrap_or(preset.restitution))
        .with_friction(friction.unwrap_or(preset.friction));
        match number {
            Some(0) => body = body.with_tag(BodyTag::CueBall),
            Some(n) => body = body.with_tag(BodyTag::Ball(n)),
            None => {}
        }
        self.inner.add_body(body).to_bits()
    }

    /// Remove a body. Returns False if it was already gone.
    fn remove_body(&mut self, id: u64) -> bool {
        self.inner.remove_body(BodyHandle::from_bits(id)).is_some()
    }

    fn add_static_segment(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.inner.add_static_segment(CoreVec2::new(x1, y1), CoreVec2::new(x2, y2));
    }

    /// Add the four cushions along the play-field edges.
    fn add_table_cushions(&mut self) {
        self.inner.add_boundary_rect();
    }

    fn apply_impulse(&mut self, id: u64, ix: f64, iy: f64) -> PyResult<()> {
        let handle = self.handle(id)?;
        self.inner.apply_impulse(handle, CoreVec2::new(ix, iy));
        Ok(())
    }

    fn apply_force(&mut self, id: u64, fx: f64, fy: f64) -> PyResult<()> {
        let handle = self.handle(id)?;
        self.inner.apply_force(handle, CoreVec2::new(fx, fy));
        Ok(())
    }

    /// Respawn a body at rest (e.g. the cue ball after a scratch).
    fn reset_body(&mut self, id: u64, x: f64, y: f64) -> PyResult<()> {
        let handle = self.handle(id)?;
        self.inner.reset_body(handle, CoreVec2::new(x, y));
        Ok(())
    }

    fn body_position(&self, id: u64) -> PyResult<Vec2> {
        Ok(self.body(id)?.position.into())
    }

    fn body_velocity(&self, id: u64) -> PyResult<Vec2> {
        Ok(self.body(id)?.velocity.into())
    }

    fn body_radius(&self, id: u64) -> PyResult<f64> {
        Ok(self.body(id)?.radius)
    }

    #[pyo3(signature = (id, threshold=constants::REST_SPEED))]
    fn is_moving(&self, id: u64, threshold: f64) -> PyResult<bool> {
        Ok(self.body(id)?.is_moving(threshold))
    }

    /// True once every ball has slowed below `threshold`.
    #[pyo3(signature = (threshold=constants::REST_SPEED))]
    fn is_settled(&self, threshold: f64) -> bool {
        self.inner.is_settled(threshold)
    }

    /// Ids of every live body, in simulation order.
    fn body_ids(&self) -> Vec<u64> {
        self.inner.bodies().map(|(h, _)| h.to_bits()).collect()
    }

    /// Advance one frame. Returns (body contacts, cushion contacts).
    fn step(&mut self) -> (usize, usize) {
        let report = self.inner.step();
        (report.body_contacts, report.boundary_contacts)
    }

    /// Run several frames at once (more efficient).
    fn step_n(&mut self, frames: usize) -> (usize, usize) {
        let report = self.inner.step_n(frames);
        (report.body_contacts, report.boundary_contacts)
    }

    /// Drop every body and cushion.
    fn reset(&mut self) {
        self.inner.reset();
    }

    /// Get current state as dict for easy inspection.
    fn state_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        dict.set_item("time", self.inner.time())?;
        dict.set_item("frame", self.inner.frame())?;
        dict.set_item("kinetic_energy", self.inner.kinetic_energy())?;

        let bodies = PyDict::new(py);
        for (handle, body) in self.inner.bodies() {
            let entry = PyDict::new(py);
            entry.set_item("x", body.position.x)?;
            entry.set_item("y", body.position.y)?;
            entry.set_item("vx", body.velocity.x)?;
            entry.set_item("vy", body.velocity.y)?;
            entry.set_item("radius", body.radius)?;
            let number = match body.tag {
                Some(BodyTag::CueBall) => Some(0u8),
                Some(BodyTag::Ball(n)) => Some(n),
                _ => None,
            };
            entry.set_item("number", number)?;
            bodies.set_item(handle.to_bits(), entry)?;
        }
        dict.set_item("bodies", bodies)?;
        Ok(dict)
    }
}

/// Python module definition.
#[pymodule]
fn pool_physics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec2>()?;
    m.add_class::<World>()?;
    Ok(())
}
