use crate::core::error::TopologyError;
use crate::core::models::topology::RBTopology;
use crate::core::rotations::{compose, matrix_to_angle_axis};
use nalgebra::{Matrix3, Vector3};
use tracing::trace;

/// Rigid whole-configuration transforms for a cluster of angle-axis rigid bodies.
#[derive(Debug, Clone, Copy)]
pub struct TransformAACluster<'a> {
    topology: &'a RBTopology,
}

impl<'a> TransformAACluster<'a> {
    pub fn new(topology: &'a RBTopology) -> Self {
        Self { topology }
    }

    pub fn topology(&self) -> &'a RBTopology {
        self.topology
    }

    /// Rotates the whole configuration `x` by `mx`.
    ///
    /// Every center `c` becomes `mx · c` and every orientation `p` is composed with the
    /// angle-axis equivalent of `mx`. Configurations with non-rigid atoms are rejected
    /// before `x` is modified.
    pub fn rotate(&self, x: &mut [f64], mx: &Matrix3<f64>) -> Result<(), TopologyError> {
        if self.topology.non_rigid_atoms() > 0 {
            return Err(TopologyError::Unsupported(
                "rotating configurations with non-rigid atoms",
            ));
        }
        let mut ca = self.topology.coords_adaptor_mut(x)?;
        if ca.nrigid() == 0 {
            return Ok(());
        }

        // Row-vector convention: centers (nrigid x 3) times mx^T.
        for xyz in ca.all_centers_mut().chunks_exact_mut(3) {
            let rotated = mx * Vector3::new(xyz[0], xyz[1], xyz[2]);
            xyz.copy_from_slice(rotated.as_slice());
        }

        let dp = matrix_to_angle_axis(mx);
        for isite in 0..ca.nrigid() {
            let p = compose(&ca.rotation_vector(isite), &dp);
            ca.set_rotation(isite, &p);
        }
        trace!(nrigid = ca.nrigid(), "Rotated cluster configuration.");
        Ok(())
    }

    /// Translates every center, and every non-rigid atom, of `x` by `d`.
    pub fn translate(&self, x: &mut [f64], d: &Vector3<f64>) -> Result<(), TopologyError> {
        let mut ca = self.topology.coords_adaptor_mut(x)?;
        for xyz in ca.all_centers_mut().chunks_exact_mut(3) {
            for (value, shift) in xyz.iter_mut().zip(d.iter()) {
                *value += shift;
            }
        }
        for xyz in ca.non_rigid_positions_mut().chunks_exact_mut(3) {
            for (value, shift) in xyz.iter_mut().zip(d.iter()) {
                *value += shift;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::fragment::RigidFragment;
    use crate::core::rotations::angle_axis_to_matrix;
    use std::f64::consts::PI;

    const TOLERANCE: f64 = 1e-9;

    fn topology(nsites: usize, non_rigid_atoms: usize) -> RBTopology {
        let mut topology = RBTopology::new();
        for _ in 0..nsites {
            topology.add_site(
                RigidFragment::from_flat(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.2, 0.0]).unwrap(),
            );
        }
        topology.set_non_rigid_atoms(non_rigid_atoms);
        topology
    }

    fn sample_coords() -> Vec<f64> {
        vec![
            1.0, 0.0, 0.0, // center 0
            0.5, -1.0, 2.0, // center 1
            0.2, 0.3, -0.4, // rotation 0
            -1.5, 0.8, 0.6, // rotation 1
        ]
    }

    #[test]
    fn rotate_maps_centers_through_matrix() {
        let topology = topology(2, 0);
        let transform = TransformAACluster::new(&topology);
        let mx = angle_axis_to_matrix(&Vector3::new(0.0, 0.0, PI / 2.0));
        let mut x = sample_coords();

        transform.rotate(&mut x, &mx).unwrap();

        assert!((Vector3::new(x[0], x[1], x[2]) - Vector3::new(0.0, 1.0, 0.0)).norm() < TOLERANCE);
        assert!(
            (Vector3::new(x[3], x[4], x[5]) - Vector3::new(1.0, 0.5, 2.0)).norm() < TOLERANCE
        );
    }

    #[test]
    fn rotate_composes_orientations_with_matrix() {
        let topology = topology(2, 0);
        let transform = TransformAACluster::new(&topology);
        let mx = angle_axis_to_matrix(&Vector3::new(0.7, -0.2, 1.3));
        let original = sample_coords();
        let mut x = original.clone();

        transform.rotate(&mut x, &mx).unwrap();

        for isite in 0..2 {
            let before = Vector3::from_column_slice(&original[6 + 3 * isite..9 + 3 * isite]);
            let after = Vector3::from_column_slice(&x[6 + 3 * isite..9 + 3 * isite]);
            let expected = mx * angle_axis_to_matrix(&before);
            assert!((angle_axis_to_matrix(&after) - expected).abs().max() < 1e-9);
        }
    }

    #[test]
    fn rotate_commutes_with_atomistic_map() {
        let topology = topology(2, 0);
        let transform = TransformAACluster::new(&topology);
        let mx = angle_axis_to_matrix(&Vector3::new(-0.4, 1.1, 0.5));
        let original = sample_coords();
        let mut rotated = original.clone();
        transform.rotate(&mut rotated, &mx).unwrap();

        let before = topology.to_atomistic(&original).unwrap();
        let after = topology.to_atomistic(&rotated).unwrap();
        for (b, a) in before.chunks_exact(3).zip(after.chunks_exact(3)) {
            let expected = mx * Vector3::new(b[0], b[1], b[2]);
            assert!((Vector3::new(a[0], a[1], a[2]) - expected).norm() < 1e-9);
        }
    }

    #[test]
    fn rotate_rejects_non_rigid_atoms_without_mutation() {
        let topology = topology(2, 1);
        let transform = TransformAACluster::new(&topology);
        let mut x = sample_coords();
        x.extend([3.0, 3.0, 3.0]);
        let original = x.clone();

        let result = transform.rotate(&mut x, &Matrix3::identity());

        assert!(matches!(result, Err(TopologyError::Unsupported(_))));
        assert_eq!(x, original);
    }

    #[test]
    fn rotate_rejects_wrong_size() {
        let topology = topology(2, 0);
        let transform = TransformAACluster::new(&topology);
        let mut x = vec![0.0; 6];
        let result = transform.rotate(&mut x, &Matrix3::identity());
        assert!(matches!(result, Err(TopologyError::SizeMismatch { .. })));
    }

    #[test]
    fn rotate_on_empty_topology_is_noop() {
        let topology = topology(0, 0);
        let transform = TransformAACluster::new(&topology);
        let mut x: Vec<f64> = Vec::new();
        assert!(transform.rotate(&mut x, &Matrix3::identity()).is_ok());
    }

    #[test]
    fn translate_shifts_centers_and_free_atoms_only() {
        let topology = topology(2, 1);
        let transform = TransformAACluster::new(&topology);
        let mut x = sample_coords();
        x.extend([3.0, 3.0, 3.0]);
        let original = x.clone();

        transform
            .translate(&mut x, &Vector3::new(1.0, -1.0, 0.5))
            .unwrap();

        assert_eq!(&x[0..3], &[2.0, -1.0, 0.5]);
        assert_eq!(&x[3..6], &[1.5, -2.0, 2.5]);
        assert_eq!(&x[6..12], &original[6..12]);
        assert_eq!(&x[12..15], &[4.0, 2.0, 3.5]);
    }
}
