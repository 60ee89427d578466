use crate::core::error::TopologyError;
use nalgebra::Vector3;
use std::ops::Range;

/// A structural view over a packed configuration array.
///
/// The backing array holds `nrigid` centers, then `nrigid` angle-axis rotations, then the
/// positions of `non_rigid_atoms` free atoms. All accessors return sub-slices of the
/// backing array, so writes through the `_mut` accessors land in the caller's buffer.
#[derive(Debug)]
pub struct CoordsAdaptor<S> {
    nrigid: usize,
    non_rigid_atoms: usize,
    coords: S,
}

impl<S: AsRef<[f64]>> CoordsAdaptor<S> {
    pub fn new(nrigid: usize, non_rigid_atoms: usize, coords: S) -> Result<Self, TopologyError> {
        TopologyError::check_size(
            "coordinate array",
            6 * nrigid + 3 * non_rigid_atoms,
            coords.as_ref().len(),
        )?;
        Ok(Self {
            nrigid,
            non_rigid_atoms,
            coords,
        })
    }

    pub fn nrigid(&self) -> usize {
        self.nrigid
    }

    pub fn non_rigid_atoms(&self) -> usize {
        self.non_rigid_atoms
    }

    fn centers_range(&self) -> Range<usize> {
        0..3 * self.nrigid
    }

    fn rotations_range(&self) -> Range<usize> {
        3 * self.nrigid..6 * self.nrigid
    }

    fn non_rigid_range(&self) -> Range<usize> {
        6 * self.nrigid..6 * self.nrigid + 3 * self.non_rigid_atoms
    }

    fn site_range(&self, block: Range<usize>, isite: usize) -> Range<usize> {
        assert!(
            isite < self.nrigid,
            "site index {} out of range for {} rigid bodies",
            isite,
            self.nrigid
        );
        block.start + 3 * isite..block.start + 3 * isite + 3
    }

    pub fn all_centers(&self) -> &[f64] {
        &self.coords.as_ref()[self.centers_range()]
    }

    pub fn all_rotations(&self) -> &[f64] {
        &self.coords.as_ref()[self.rotations_range()]
    }

    pub fn non_rigid_positions(&self) -> &[f64] {
        &self.coords.as_ref()[self.non_rigid_range()]
    }

    pub fn center(&self, isite: usize) -> &[f64] {
        let range = self.site_range(self.centers_range(), isite);
        &self.coords.as_ref()[range]
    }

    pub fn rotation(&self, isite: usize) -> &[f64] {
        let range = self.site_range(self.rotations_range(), isite);
        &self.coords.as_ref()[range]
    }

    pub fn center_vector(&self, isite: usize) -> Vector3<f64> {
        Vector3::from_column_slice(self.center(isite))
    }

    pub fn rotation_vector(&self, isite: usize) -> Vector3<f64> {
        Vector3::from_column_slice(self.rotation(isite))
    }
}

impl<S: AsRef<[f64]> + AsMut<[f64]>> CoordsAdaptor<S> {
    pub fn all_centers_mut(&mut self) -> &mut [f64] {
        let range = self.centers_range();
        &mut self.coords.as_mut()[range]
    }

    pub fn all_rotations_mut(&mut self) -> &mut [f64] {
        let range = self.rotations_range();
        &mut self.coords.as_mut()[range]
    }

    pub fn non_rigid_positions_mut(&mut self) -> &mut [f64] {
        let range = self.non_rigid_range();
        &mut self.coords.as_mut()[range]
    }

    pub fn center_mut(&mut self, isite: usize) -> &mut [f64] {
        let range = self.site_range(self.centers_range(), isite);
        &mut self.coords.as_mut()[range]
    }

    pub fn rotation_mut(&mut self, isite: usize) -> &mut [f64] {
        let range = self.site_range(self.rotations_range(), isite);
        &mut self.coords.as_mut()[range]
    }

    pub fn set_center(&mut self, isite: usize, value: &Vector3<f64>) {
        self.center_mut(isite).copy_from_slice(value.as_slice());
    }

    pub fn set_rotation(&mut self, isite: usize, value: &Vector3<f64>) {
        self.rotation_mut(isite).copy_from_slice(value.as_slice());
    }
}
