use crate::core::error::TopologyError;
use crate::core::rotations::{angle_axis_to_matrix, matrix_and_derivatives};
use nalgebra::{Point3, Vector3};

/// A single rigid body: a fixed set of atom positions in the body frame.
///
/// The fragment carries no configuration state. A configuration is supplied per call as a
/// center position plus an angle-axis rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidFragment {
    atom_positions: Vec<Vector3<f64>>,
}

impl RigidFragment {
    pub fn new(atom_positions: Vec<Point3<f64>>) -> Result<Self, TopologyError> {
        if atom_positions.is_empty() {
            return Err(TopologyError::EmptyFragment);
        }
        Ok(Self {
            atom_positions: atom_positions.into_iter().map(|p| p.coords).collect(),
        })
    }

    /// Builds a fragment from body-frame positions flattened as `[x0, y0, z0, x1, ...]`.
    pub fn from_flat(positions: &[f64]) -> Result<Self, TopologyError> {
        if positions.len() % 3 != 0 {
            return Err(TopologyError::InvalidFragment(format!(
                "flat position array of length {} is not a multiple of 3",
                positions.len()
            )));
        }
        Self::new(
            positions
                .chunks_exact(3)
                .map(|xyz| Point3::new(xyz[0], xyz[1], xyz[2]))
                .collect(),
        )
    }

    pub fn natoms(&self) -> usize {
        self.atom_positions.len()
    }

    pub fn atom_positions(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.atom_positions.iter().map(|q| Point3::from(*q))
    }

    /// World-frame positions `center + R(rotation) · q` for every body-frame atom `q`,
    /// flattened in the fragment's atom order.
    pub fn to_atomistic(&self, center: &Vector3<f64>, rotation: &Vector3<f64>) -> Vec<f64> {
        let mut positions = vec![0.0; 3 * self.natoms()];
        self.write_atomistic(center, rotation, &mut positions);
        positions
    }

    /// Same as [`to_atomistic`](Self::to_atomistic), writing into `out`, which must hold
    /// exactly `3 * natoms` values.
    pub(crate) fn write_atomistic(
        &self,
        center: &Vector3<f64>,
        rotation: &Vector3<f64>,
        out: &mut [f64],
    ) {
        debug_assert_eq!(out.len(), 3 * self.natoms());
        let rmat = angle_axis_to_matrix(rotation);
        for (q, xyz) in self.atom_positions.iter().zip(out.chunks_exact_mut(3)) {
            let world = center + rmat * q;
            xyz.copy_from_slice(world.as_slice());
        }
    }

    /// Chain rule for [`to_atomistic`](Self::to_atomistic): maps a per-atom gradient block
    /// of length `3 * natoms` to `(center_gradient, rotation_gradient)`.
    pub fn transform_grad(
        &self,
        rotation: &Vector3<f64>,
        gradient: &[f64],
    ) -> Result<(Vector3<f64>, Vector3<f64>), TopologyError> {
        TopologyError::check_size("atomistic gradient", 3 * self.natoms(), gradient.len())?;

        let (_, drm) = matrix_and_derivatives(rotation);

        let mut g_com = Vector3::zeros();
        let mut g_rot = Vector3::zeros();
        for (q, g) in self.atom_positions.iter().zip(gradient.chunks_exact(3)) {
            let g = Vector3::new(g[0], g[1], g[2]);
            g_com += g;
            for (m, d) in drm.iter().enumerate() {
                g_rot[m] += g.dot(&(d * q));
            }
        }
        Ok((g_com, g_rot))
    }
}
