//! Procedural field layout.
//!
//! The field is partitioned into a grid of equal square cells. Each cell
//! receives exactly one item: a tree or house, or one of the reserved
//! package/zone markers. Items are jittered inside their cell by at most
//! `cell_radius - max_obstacle_radius`, so no item reaches into a
//! neighboring cell and no two items overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use skydrop_physics::WorldConfig;

use crate::error::{GameError, Result};
use crate::obstacle::{Obstacle, ObstacleKind};
use crate::random::SeededRandom;
use crate::task::TargetKind;

/// How many items to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutParams {
    /// Placement cells, one item per cell.
    pub total_cells: usize,
    pub package_count: usize,
    pub zone_count: usize,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            total_cells: 35,
            package_count: 3,
            zone_count: 3,
        }
    }
}

impl LayoutParams {
    /// Cells set aside for markers.
    pub fn reserved(&self) -> usize {
        self.package_count + self.zone_count
    }

    /// Deliveries needed to finish an episode.
    pub fn deliveries(&self) -> usize {
        self.package_count.min(self.zone_count)
    }
}

/// Obstacle mix and scale ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Chance a regular cell gets a tree instead of a house.
    pub tree_probability: f32,
    /// Half-open `[min, max)` tree scale range.
    pub tree_scale: (f32, f32),
    /// Half-open `[min, max)` house scale range.
    pub house_scale: (f32, f32),
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tree_probability: 0.75,
            tree_scale: (0.5, 1.5),
            house_scale: (0.85, 1.35),
        }
    }
}

impl LayoutConfig {
    /// Upper bound on the height of anything this config can place.
    pub fn max_obstacle_height(&self, world: &WorldConfig) -> f32 {
        world
            .tree_height(self.tree_scale.1)
            .max(world.house_height(self.house_scale.1))
    }
}

/// Cell grid covering the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPlan {
    pub cell_radius: f32,
    pub cells_x: usize,
    pub cells_z: usize,
    /// Field extents the grid was planned for.
    pub field: Vec2,
}

impl GridPlan {
    /// Plan a grid with at least `total_cells` cells.
    ///
    /// The cell radius is the largest that fits `total_cells` square cells
    /// along the shorter field side. If the rounded-down grid is short of
    /// cells, the smaller dimension grows one step at a time (ties grow Z).
    pub fn new(total_cells: usize, field_x: f32, field_z: f32) -> Result<Self> {
        if total_cells == 0 {
            return Err(GameError::EmptyLayout);
        }

        let root = (total_cells as f32).sqrt();
        let cell_radius = (field_x / (2.0 * root)).min(field_z / (2.0 * root));

        let mut cells_x = ((field_x / (2.0 * cell_radius)) as usize).max(1);
        let mut cells_z = ((field_z / (2.0 * cell_radius)) as usize).max(1);

        while cells_x * cells_z < total_cells {
            if cells_x < cells_z {
                cells_x += 1;
            } else {
                cells_z += 1;
            }
        }

        Ok(Self {
            cell_radius,
            cells_x,
            cells_z,
            field: Vec2::new(field_x, field_z),
        })
    }

    /// Grid coordinate of a cell index, row-major along X.
    #[inline]
    pub fn coord(&self, index: usize) -> (usize, usize) {
        (index % self.cells_x, index / self.cells_x)
    }

    /// Ground-plane center of a cell.
    pub fn cell_center(&self, index: usize) -> Vec2 {
        let (x, z) = self.coord(index);
        let diameter = 2.0 * self.cell_radius;
        Vec2::new(
            -self.field.x / 2.0 + self.cell_radius + diameter * x as f32,
            -self.field.y / 2.0 + self.cell_radius + diameter * z as f32,
        )
    }

    /// Index of the cell containing a ground point, clamped to the grid.
    pub fn cell_index_of(&self, point: Vec2) -> usize {
        let diameter = 2.0 * self.cell_radius;
        let local = (point + self.field / 2.0) / diameter;
        let x = (local.x.max(0.0) as usize).min(self.cells_x - 1);
        let z = (local.y.max(0.0) as usize).min(self.cells_z - 1);
        z * self.cells_x + x
    }
}

/// Everything placed on the field for one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Trees and houses in cell order.
    pub obstacles: Vec<Obstacle>,
    /// Packages in cell order. Package `i` is delivered to zone `i`.
    pub packages: Vec<Obstacle>,
    /// Delivery zones in cell order.
    pub zones: Vec<Obstacle>,
    pub grid: GridPlan,
}

impl Layout {
    pub fn package(&self, index: usize) -> Result<&Obstacle> {
        self.packages.get(index).ok_or(GameError::TargetOutOfRange {
            kind: TargetKind::Package,
            index,
            len: self.packages.len(),
        })
    }

    pub fn zone(&self, index: usize) -> Result<&Obstacle> {
        self.zones.get(index).ok_or(GameError::TargetOutOfRange {
            kind: TargetKind::Zone,
            index,
            len: self.zones.len(),
        })
    }

    /// Markers in placement order: packages first, then zones.
    pub fn markers(&self) -> impl Iterator<Item = &Obstacle> {
        self.packages.iter().chain(self.zones.iter())
    }

    /// Every placed item.
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().chain(self.markers())
    }

    pub fn len(&self) -> usize {
        self.obstacles.len() + self.packages.len() + self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Populate the field.
///
/// Reserved cells are drawn without replacement up front; the first
/// `zone_count` of them become delivery zones and the rest packages. Every
/// other cell gets a tree or a house. A layout without a single delivery and
/// over-reserving are both rejected before any randomness is consumed.
pub fn generate(
    params: &LayoutParams,
    world: &WorldConfig,
    config: &LayoutConfig,
    rng: &mut SeededRandom,
) -> Result<Layout> {
    let total = params.total_cells;
    if params.deliveries() == 0 {
        return Err(GameError::NoDeliveries {
            packages: params.package_count,
            zones: params.zone_count,
        });
    }
    if params.reserved() > total {
        return Err(GameError::TooManyReservations {
            reserved: params.reserved(),
            cells: total,
        });
    }

    let grid = GridPlan::new(total, world.field_x, world.field_z)?;
    let inset = world.max_obstacle_radius();
    if grid.cell_radius < inset {
        return Err(GameError::CellTooSmall {
            cell_radius: grid.cell_radius,
            required: inset,
        });
    }

    let reserved = rng.sample_distinct(total, params.reserved());
    let (zone_cells, package_cells) = reserved.split_at(params.zone_count);

    let mut layout = Layout {
        obstacles: Vec::with_capacity(total - params.reserved()),
        packages: Vec::with_capacity(params.package_count),
        zones: Vec::with_capacity(params.zone_count),
        grid,
    };

    let jitter = grid.cell_radius - inset;
    for index in 0..total {
        let offset = Vec2::new(
            rng.next_range(-jitter, jitter),
            rng.next_range(-jitter, jitter),
        );
        let position = grid.cell_center(index) + offset;

        if zone_cells.contains(&index) {
            layout
                .zones
                .push(Obstacle::new(position, 1.0, ObstacleKind::DeliveryZone));
        } else if package_cells.contains(&index) {
            layout
                .packages
                .push(Obstacle::new(position, 1.0, ObstacleKind::Package));
        } else if rng.next_bool(config.tree_probability) {
            let scale = rng.next_range(config.tree_scale.0, config.tree_scale.1);
            layout
                .obstacles
                .push(Obstacle::new(position, scale, ObstacleKind::Tree));
        } else {
            let scale = rng.next_range(config.house_scale.0, config.house_scale.1);
            layout
                .obstacles
                .push(Obstacle::new(position, scale, ObstacleKind::House));
        }
    }

    tracing::info!(
        cells = total,
        grid_x = grid.cells_x,
        grid_z = grid.cells_z,
        obstacles = layout.obstacles.len(),
        packages = layout.packages.len(),
        zones = layout.zones.len(),
        "field layout generated"
    );

    Ok(layout)
}
