//! The per-session element store.
//!
//! Created once from a `SceneConfig`: generated positions and attributes are
//! immutable afterwards, only the animation state inside the sets changes.

use crate::animation::{ElementSet, PhotoSet, SecondaryMotion};
use crate::config::{CategoryConfig, SceneConfig};
use crate::constants::*;
use crate::distribution::{self, even_azimuth, Azimuth};
use crate::element::{photo_image_url, Element, Photo};
use crate::error::ConfigError;
use crate::foliage::FoliageCloud;
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::FRAC_PI_2;

pub struct Scene {
    pub foliage: FoliageCloud,
    pub ornaments: ElementSet,
    pub lights: ElementSet,
    pub photos: PhotoSet,
}

/// Independent RNG stream per category so changing one count does not
/// reshuffle the others.
fn stream(seed: u64, index: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[inline]
fn rgba(srgb: [f32; 3], alpha: f32) -> [f32; 4] {
    let [r, g, b] = srgb_to_linear(srgb);
    [r, g, b, alpha]
}

impl Scene {
    pub fn generate(config: &SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed;

        let mut rng = stream(seed, 0);
        let foliage_positions = positions(&mut rng, &config.foliage, Azimuth::Random);
        let foliage = FoliageCloud::from_positions(&foliage_positions);

        let mut rng = stream(seed, 1);
        let ornaments = generate_ornaments(&mut rng, config);

        let mut rng = stream(seed, 2);
        let lights = generate_lights(&mut rng, config);

        let mut rng = stream(seed, 3);
        let photos = generate_photos(&mut rng, config);

        log::info!(
            "[scene] seed={} foliage={} ornaments={} lights={} photos={}",
            seed,
            foliage.len(),
            ornaments.len(),
            lights.len(),
            photos.len()
        );
        Ok(Self {
            foliage,
            ornaments: ElementSet::new(ornaments, SecondaryMotion::None),
            lights: ElementSet::new(
                lights,
                SecondaryMotion::Pulse {
                    freq: LIGHT_PULSE_FREQ,
                    base: LIGHT_PULSE_BASE,
                    amplitude: LIGHT_PULSE_AMPLITUDE,
                },
            ),
            photos: PhotoSet::new(
                photos,
                SecondaryMotion::Float {
                    amplitude: PHOTO_FLOAT_AMPLITUDE,
                },
                rgba(SNOW, 1.0),
                seed ^ 0x5EED_F0A0,
            ),
        })
    }
}

fn positions(
    rng: &mut StdRng,
    cat: &CategoryConfig,
    azimuth: Azimuth,
) -> distribution::DualPositions {
    distribution::generate(rng, cat.count, &cat.cone, &cat.chaos, azimuth)
}

fn generate_ornaments(rng: &mut StdRng, config: &SceneConfig) -> Vec<Element> {
    let dual = positions(rng, &config.ornaments, Azimuth::Random);
    let rates = &config.rates;
    (0..dual.len())
        .map(|i| Element {
            id: i as u32,
            formed: dual.formed[i],
            chaos: dual.chaos[i],
            blend_rate: rates.ornament_min + rng.gen::<f32>() * rates.ornament_span,
            color: rgba(ORNAMENT_PALETTE[i % ORNAMENT_PALETTE.len()], 1.0),
            size: ORNAMENT_SIZE_MIN + rng.gen::<f32>() * ORNAMENT_SIZE_SPAN,
        })
        .collect()
}

fn generate_lights(rng: &mut StdRng, config: &SceneConfig) -> Vec<Element> {
    let dual = positions(rng, &config.lights, Azimuth::Random);
    (0..dual.len())
        .map(|i| Element {
            id: i as u32,
            formed: dual.formed[i],
            chaos: dual.chaos[i],
            blend_rate: config.rates.light,
            color: rgba(GOLD, LIGHT_OPACITY),
            size: LIGHT_SIZE,
        })
        .collect()
}

fn generate_photos(rng: &mut StdRng, config: &SceneConfig) -> Vec<Photo> {
    let cat = &config.photos;
    let dual = positions(rng, cat, Azimuth::EvenlySpaced);
    (0..dual.len())
        .map(|i| {
            let theta = even_azimuth(i, cat.count);
            // Face outward from the trunk, with a slight random roll.
            let rotation = Vec3::new(
                0.0,
                FRAC_PI_2 - theta,
                (rng.gen::<f32>() - 0.5) * PHOTO_TILT_SPAN,
            );
            Photo {
                id: i as u32,
                formed: dual.formed[i],
                chaos: dual.chaos[i],
                blend_rate: config.rates.photo,
                rotation,
                image_url: photo_image_url(i as u32),
            }
        })
        .collect()
}
