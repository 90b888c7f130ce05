use glam::Vec3;

/// Immutable generation-time data of an ornament or a light.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub id: u32,
    pub formed: Vec3,
    pub chaos: Vec3,
    /// Fraction of the remaining distance covered each frame, in (0, 1].
    pub blend_rate: f32,
    pub color: [f32; 4],
    pub size: f32,
}

impl Element {
    #[inline]
    pub fn target(&self, formed: bool) -> Vec3 {
        if formed {
            self.formed
        } else {
            self.chaos
        }
    }
}

/// A hanging photo panel. `rotation` is its XYZ Euler orientation on the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Photo {
    pub id: u32,
    pub formed: Vec3,
    pub chaos: Vec3,
    pub blend_rate: f32,
    pub rotation: Vec3,
    /// External image reference; fetching is the renderer's business.
    pub image_url: String,
}

#[inline]
pub fn photo_image_url(id: u32) -> String {
    format!("https://picsum.photos/seed/{}/200/200", id + 100)
}
