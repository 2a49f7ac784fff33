//! Falling-snow overlay drawn over the page when `snowEffectEnabled` is on.

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flake {
    pub x: u16,
    pub y: u16,
}

#[derive(Debug, Clone, Default)]
pub struct Snowfall {
    flakes: Vec<Flake>,
    target: usize,
}

impl Snowfall {
    /// A snowfall that keeps about `target` flakes on screen.
    pub fn new(target: usize) -> Self {
        Self {
            flakes: Vec::with_capacity(target),
            target,
        }
    }

    pub fn flakes(&self) -> &[Flake] {
        &self.flakes
    }

    pub fn clear(&mut self) {
        self.flakes.clear();
    }

    /// Drop every flake one row with a little sideways drift, forget the
    /// ones that left the area and spawn new ones along the top edge.
    pub fn tick<R: Rng + ?Sized>(&mut self, width: u16, height: u16, rng: &mut R) {
        if width == 0 || height == 0 {
            self.flakes.clear();
            return;
        }

        for flake in &mut self.flakes {
            flake.y = flake.y.saturating_add(1);
            let drift: i32 = rng.random_range(-1..=1);
            flake.x = (flake.x as i32 + drift).clamp(0, width as i32 - 1) as u16;
        }
        self.flakes.retain(|f| f.y < height && f.x < width);

        // Spread spawning over the height so the screen fills evenly.
        let per_tick = (self.target / height as usize).max(1);
        for _ in 0..per_tick {
            if self.flakes.len() >= self.target {
                break;
            }
            self.flakes.push(Flake {
                x: rng.random_range(0..width),
                y: 0,
            });
        }
    }
}
