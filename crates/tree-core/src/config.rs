use crate::constants::*;
use crate::distribution::{ChaosEnvelope, ConeEnvelope};
use crate::error::ConfigError;

/// Placement parameters for one element category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryConfig {
    pub count: usize,
    pub cone: ConeEnvelope,
    pub chaos: ChaosEnvelope,
}

/// Per-frame blend rates. Ornaments draw theirs from `[min, min + span)`.
#[derive(Clone, Debug, PartialEq)]
pub struct BlendRates {
    pub foliage_progress: f32,
    pub ornament_min: f32,
    pub ornament_span: f32,
    pub light: f32,
    pub photo: f32,
}

/// Everything needed to generate one session's scene. Fixed for the session.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub seed: u64,
    pub foliage: CategoryConfig,
    pub ornaments: CategoryConfig,
    pub lights: CategoryConfig,
    pub photos: CategoryConfig,
    pub rates: BlendRates,
}

fn cone(radius_scale: f32, y_inset: f32) -> ConeEnvelope {
    ConeEnvelope {
        height: TREE_HEIGHT,
        base_radius: TREE_RADIUS,
        radius_scale,
        y_inset,
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            foliage: CategoryConfig {
                count: FOLIAGE_COUNT,
                cone: cone(1.0, 0.0),
                chaos: ChaosEnvelope::Shell {
                    radius: CHAOS_RADIUS,
                    min_frac: CHAOS_SHELL_MIN,
                },
            },
            ornaments: CategoryConfig {
                count: ORNAMENT_COUNT,
                cone: cone(ORNAMENT_RADIUS_SCALE, ORNAMENT_Y_INSET),
                chaos: ChaosEnvelope::Cube {
                    half_extent: CHAOS_RADIUS,
                },
            },
            lights: CategoryConfig {
                count: LIGHT_COUNT,
                cone: cone(LIGHT_RADIUS_SCALE, 0.0),
                chaos: ChaosEnvelope::Cube {
                    half_extent: LIGHT_CHAOS_EXTENT,
                },
            },
            photos: CategoryConfig {
                count: PHOTO_COUNT,
                cone: cone(PHOTO_RADIUS_SCALE, PHOTO_Y_INSET),
                chaos: ChaosEnvelope::Cube {
                    half_extent: PHOTO_CHAOS_EXTENT,
                },
            },
            rates: BlendRates {
                foliage_progress: FOLIAGE_PROGRESS_RATE,
                ornament_min: ORNAMENT_RATE_MIN,
                ornament_span: ORNAMENT_RATE_SPAN,
                light: LIGHT_RATE,
                photo: PHOTO_RATE,
            },
        }
    }
}

impl SceneConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, cat) in self.categories() {
            let c = &cat.cone;
            if !(c.height > 0.0) {
                return Err(ConfigError::Height(c.height));
            }
            if !(c.base_radius > 0.0) || !(c.radius_scale > 0.0) {
                return Err(ConfigError::Radius(c.base_radius * c.radius_scale));
            }
            if c.y_inset < 0.0 || 2.0 * c.y_inset >= c.height {
                return Err(ConfigError::Inset {
                    inset: c.y_inset,
                    height: c.height,
                });
            }
            let extent = match cat.chaos {
                ChaosEnvelope::Shell { radius, .. } => radius,
                ChaosEnvelope::Cube { half_extent } => half_extent,
            };
            if !(extent > 0.0) {
                return Err(ConfigError::ChaosExtent {
                    category: name,
                    value: extent,
                });
            }
        }
        let r = &self.rates;
        let ornament_max = r.ornament_min + r.ornament_span;
        check_rate("foliage", r.foliage_progress)?;
        check_rate("ornament", r.ornament_min)?;
        check_rate("ornament", ornament_max)?;
        check_rate("light", r.light)?;
        check_rate("photo", r.photo)?;
        Ok(())
    }

    fn categories(&self) -> [(&'static str, &CategoryConfig); 4] {
        [
            ("foliage", &self.foliage),
            ("ornament", &self.ornaments),
            ("light", &self.lights),
            ("photo", &self.photos),
        ]
    }
}

#[inline]
fn check_rate(category: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::BlendRate { category, value })
    }
}
