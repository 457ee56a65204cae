//! Layout pass: columns from the branch tree, unit conversion and normalization

use crate::errors::ProfileError;
use crate::log::debug;
use crate::model::{Level, PlotDescriptor, Profile};
use crate::types::convert_units;

/// Assign x-indices, convert energies to output units and zero them on the reference level.
///
/// Levels are addressed by position: level `k` (1-based) is `levels[k - 1]`, and an unset
/// `connected_to` on any level but the first defaults to the previous level.
pub fn layout(descriptor: PlotDescriptor, mut levels: Vec<Level>) -> Result<Profile, ProfileError> {
    if levels.is_empty() {
        return Err(ProfileError::format("no energy levels to lay out"));
    }
    if descriptor.reference > levels.len() {
        return Err(ProfileError::format(format!(
            "Can't reference to line {}. Only {} lines exist.",
            descriptor.reference,
            levels.len()
        )));
    }

    let (from, to) = (descriptor.in_unit, descriptor.out_unit);

    let root = &mut levels[0];
    root.xindex = 1;
    root.energy = convert_units(root.energy, from, to);
    let mut min_energy = root.energy;
    let mut max_energy = root.energy;
    let mut max_xindex = root.xindex;

    for k in 1..levels.len() {
        let number = levels[k].number;
        let parent = *levels[k].connected_to.get_or_insert(number.saturating_sub(1)) as usize;
        if parent == 0 || parent > k {
            return Err(ProfileError::format(format!(
                "Level {number} cannot connect to level {parent}."
            )));
        }
        let xindex = levels[parent - 1].xindex + 1;

        let level = &mut levels[k];
        level.xindex = xindex;
        level.energy = convert_units(level.energy, from, to);

        min_energy = min_energy.min(level.energy);
        max_energy = max_energy.max(level.energy);
        max_xindex = max_xindex.max(xindex);
    }

    if descriptor.reference != 0 {
        let zero = levels[descriptor.reference - 1].energy;
        for level in &mut levels {
            level.energy -= zero;
        }
        min_energy -= zero;
        max_energy -= zero;
    }

    debug!(
        levels = levels.len(),
        min_energy, max_energy, max_xindex, "laid out profile"
    );

    Ok(Profile {
        descriptor,
        levels,
        min_energy,
        max_energy,
        max_xindex,
    })
}
