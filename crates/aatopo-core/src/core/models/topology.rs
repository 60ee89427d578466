use super::adaptor::CoordsAdaptor;
use super::fragment::RigidFragment;
use crate::core::error::TopologyError;
use nalgebra::Vector3;
use std::f64::consts::PI;
use std::sync::OnceLock;
use tracing::{debug, trace, warn};

/// Angle-axis vectors shorter than this are treated as the identity rotation during
/// alignment.
pub const NEAR_IDENTITY_THRESHOLD: f64 = 1e-6;

/// An ordered collection of rigid fragments plus a count of free (non-rigid) atoms.
///
/// Generalized coordinates are packed as all centers followed by all angle-axis rotations;
/// atomistic arrays list every site's atoms in site order, followed by the non-rigid atoms.
#[derive(Debug, Clone, Default)]
pub struct RBTopology {
    sites: Vec<RigidFragment>,
    non_rigid_atoms: usize,
    natoms_total: OnceLock<usize>,
}

impl RBTopology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_site(&mut self, site: RigidFragment) {
        self.sites.push(site);
        self.natoms_total = OnceLock::new();
    }

    pub fn set_non_rigid_atoms(&mut self, count: usize) {
        self.non_rigid_atoms = count;
        self.natoms_total = OnceLock::new();
    }

    pub fn sites(&self) -> &[RigidFragment] {
        &self.sites
    }

    pub fn site(&self, isite: usize) -> Option<&RigidFragment> {
        self.sites.get(isite)
    }

    pub fn nrigid(&self) -> usize {
        self.sites.len()
    }

    pub fn non_rigid_atoms(&self) -> usize {
        self.non_rigid_atoms
    }

    /// Computes and caches the total atom count. Every transform calls this on demand.
    pub fn finalize(&self) -> usize {
        *self.natoms_total.get_or_init(|| {
            let total =
                self.sites.iter().map(RigidFragment::natoms).sum::<usize>() + self.non_rigid_atoms;
            debug!(
                nrigid = self.sites.len(),
                non_rigid_atoms = self.non_rigid_atoms,
                natoms_total = total,
                "Finalized rigid-body topology."
            );
            total
        })
    }

    pub fn natoms_total(&self) -> usize {
        self.finalize()
    }

    /// Length of a full configuration: generalized coordinates followed by the positions
    /// of the non-rigid atoms.
    pub fn ncoords(&self) -> usize {
        6 * self.nrigid() + 3 * self.non_rigid_atoms
    }

    pub fn coords_adaptor<'a>(
        &self,
        x: &'a [f64],
    ) -> Result<CoordsAdaptor<&'a [f64]>, TopologyError> {
        CoordsAdaptor::new(self.nrigid(), self.non_rigid_atoms, x)
    }

    pub fn coords_adaptor_mut<'a>(
        &self,
        x: &'a mut [f64],
    ) -> Result<CoordsAdaptor<&'a mut [f64]>, TopologyError> {
        CoordsAdaptor::new(self.nrigid(), self.non_rigid_atoms, x)
    }

    /// Maps generalized coordinates (length `6 * nrigid`) to atomistic coordinates
    /// (length `3 * natoms_total`). Non-rigid atom slots are left at zero.
    pub fn to_atomistic(&self, rbcoords: &[f64]) -> Result<Vec<f64>, TopologyError> {
        let natoms_total = self.finalize();
        TopologyError::check_size("rbcoords", 6 * self.nrigid(), rbcoords.len())?;

        let ca = CoordsAdaptor::new(self.nrigid(), 0, rbcoords)?;
        let mut atomistic = vec![0.0; 3 * natoms_total];

        let mut istart = 0;
        for (isite, site) in self.sites.iter().enumerate() {
            let iend = istart + 3 * site.natoms();
            site.write_atomistic(
                &ca.center_vector(isite),
                &ca.rotation_vector(isite),
                &mut atomistic[istart..iend],
            );
            istart = iend;
        }
        debug_assert_eq!(istart + 3 * self.non_rigid_atoms, atomistic.len());

        if self.non_rigid_atoms > 0 {
            warn!(
                "{} non-rigid atom(s) are not mapped to atomistic coordinates; their slots are left at zero.",
                self.non_rigid_atoms
            );
        }
        trace!(nrigid = self.nrigid(), "Mapped rigid-body coordinates to atoms.");
        Ok(atomistic)
    }

    /// Chain rule for [`to_atomistic`](Self::to_atomistic): accumulates the atomistic
    /// gradient `grad` into generalized coordinates, overwriting `rbgrad`.
    ///
    /// All sizes are checked before `rbgrad` is touched.
    pub fn transform_gradient(
        &self,
        rbcoords: &[f64],
        grad: &[f64],
        rbgrad: &mut [f64],
    ) -> Result<(), TopologyError> {
        let natoms_total = self.finalize();
        TopologyError::check_size("rbcoords", 6 * self.nrigid(), rbcoords.len())?;
        TopologyError::check_size("grad", 3 * natoms_total, grad.len())?;
        TopologyError::check_size("rbgrad", rbcoords.len(), rbgrad.len())?;

        let ca = CoordsAdaptor::new(self.nrigid(), 0, rbcoords)?;
        let mut rbgrad_ca = CoordsAdaptor::new(self.nrigid(), 0, rbgrad)?;

        let mut istart = 0;
        for (isite, site) in self.sites.iter().enumerate() {
            let iend = istart + 3 * site.natoms();
            let (g_com, g_rot) =
                site.transform_grad(&ca.rotation_vector(isite), &grad[istart..iend])?;
            rbgrad_ca.set_center(isite, &g_com);
            rbgrad_ca.set_rotation(isite, &g_rot);
            istart = iend;
        }
        Ok(())
    }

    /// Returns the representative of `p2` (same rotation) that is locally closest to `p1`,
    /// stepping by `2π` along the rotation axis.
    ///
    /// The step direction comes from `p2`, or from `p1` when `p2` is the identity. The
    /// search is a hill-climb: it only finds the closest representative when `p1` and `p2`
    /// are already within about one period of each other.
    pub fn align_angle_axis_vectors(p1: &Vector3<f64>, p2: &Vector3<f64>) -> Vector3<f64> {
        let mut p2 = *p2;
        let n2 = if p2.norm() < NEAR_IDENTITY_THRESHOLD {
            if p1.norm() < NEAR_IDENTITY_THRESHOLD {
                return p2;
            }
            p1 * (2.0 * PI / p1.norm())
        } else {
            p2 * (2.0 * PI / p2.norm())
        };

        // A step is taken only on a strict decrease; NaN distances compare false and stop.
        let improves = |candidate: &Vector3<f64>, current: &Vector3<f64>| {
            (candidate - p1).norm() < (current - p1).norm()
        };

        while improves(&(p2 + n2), &p2) {
            p2 += n2;
        }
        while improves(&(p2 - n2), &p2) {
            p2 -= n2;
        }
        p2
    }

    /// Aligns every rotation of `x2` against the matching rotation of `x1`, in place.
    pub fn align_all_angle_axis_vectors(
        &self,
        x1: &[f64],
        x2: &mut [f64],
    ) -> Result<(), TopologyError> {
        let c1 = self.coords_adaptor(x1)?;
        let mut c2 = self.coords_adaptor_mut(x2)?;
        for isite in 0..self.nrigid() {
            let aligned =
                Self::align_angle_axis_vectors(&c1.rotation_vector(isite), &c2.rotation_vector(isite));
            c2.set_rotation(isite, &aligned);
        }
        Ok(())
    }

    /// Aligns each configuration of `path` against its predecessor so that angle-axis
    /// vectors vary continuously along the path.
    pub fn align_path<C>(&self, path: &mut [C]) -> Result<(), TopologyError>
    where
        C: AsRef<[f64]> + AsMut<[f64]>,
    {
        let ncoords = self.ncoords();
        for x in path.iter() {
            TopologyError::check_size("path configuration", ncoords, x.as_ref().len())?;
        }

        for i in 1..path.len() {
            let (done, rest) = path.split_at_mut(i);
            self.align_all_angle_axis_vectors(done[i - 1].as_ref(), rest[0].as_mut())?;
        }
        debug!(nconfigs = path.len(), "Aligned angle-axis vectors along path.");
        Ok(())
    }
}
