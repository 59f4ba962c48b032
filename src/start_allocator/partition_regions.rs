//! Turning chosen sectors, or legacy fertility bands, into candidate start
//! regions.

use log::warn;

use crate::{
    player::PlayerId,
    region_divider::PlotTags,
    spatial::Boundary,
};

use super::{RegionList, SectorMask, StartAllocator};

impl StartAllocator<'_> {
    /// Checks that every marked sector can yield at least one valid start
    /// plot. A single unusable sector disqualifies the whole configuration
    /// and the caller falls back to legacy partitioning.
    pub(crate) fn check_start_sectors_viable(
        &self,
        sectors: &SectorMask,
        rows: u32,
        cols: u32,
        west: &Boundary,
        east: &Boundary,
    ) -> bool {
        for sector in sectors.marked() {
            let region = self.map.sector_boundary(sector, rows, cols, west, east);
            if self
                .pick_start_plot(&region, 0, PlayerId(0), true)
                .is_none()
            {
                warn!("start sector {sector} has no usable plot, sectors are not viable");
                return false;
            }
        }
        true
    }

    /// Maps the marked sectors to regions, split into the homeland and
    /// distant cohort lists. A sector belongs to the homeland cohort when it
    /// lies in the favored hemisphere (east when `east_bias`, west
    /// otherwise).
    pub(crate) fn sector_regions(
        &self,
        sectors: &SectorMask,
        rows: u32,
        cols: u32,
        west: &Boundary,
        east: &Boundary,
        east_bias: bool,
    ) -> (RegionList, RegionList) {
        let per_hemisphere = (rows * cols) as usize;
        let mut homeland = RegionList::new();
        let mut distant = RegionList::new();
        for sector in sectors.marked() {
            let region = self.map.sector_boundary(sector, rows, cols, west, east);
            if (sector >= per_hemisphere) == east_bias {
                homeland.push(region);
            } else {
                distant.push(region);
            }
        }
        (homeland, distant)
    }

    /// Runs the legacy fertility divider over one column band and collects
    /// the regions it produced.
    pub(crate) fn legacy_regions(
        &mut self,
        count: u32,
        west_column: i32,
        east_column: i32,
        tag_filter: PlotTags,
    ) -> RegionList {
        self.divider.reset();
        self.divider.divide_into_regions(
            count,
            self.parameters.min_major_fertility,
            self.parameters.min_minor_fertility,
            west_column,
            east_column,
            tag_filter,
        );

        let mut regions = RegionList::new();
        for index in 0..count {
            match self.divider.region(index) {
                Some(region) => regions.push(region),
                None => {
                    warn!("legacy divider produced {index} of {count} requested regions");
                    break;
                }
            }
        }
        regions
    }
}
