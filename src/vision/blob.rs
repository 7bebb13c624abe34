use super::segment::Mask;

pub const DEFAULT_MIN_AREA: usize = 100;

/// One 8-connected component of a mask, reduced to its raw moments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    /// Zeroth-order moment (pixel count).
    pub area: usize,
    /// First-order moments: sums of x and y over the region's pixels.
    pub m10: u64,
    pub m01: u64,
    pub min: (usize, usize),
    pub max: (usize, usize),
}

impl Region {
    /// Area-weighted mean pixel position, `None` for an empty region.
    pub fn centroid(&self) -> Option<(f32, f32)> {
        if self.area == 0 {
            return None;
        }
        let m00 = self.area as f64;
        Some(((self.m10 as f64 / m00) as f32, (self.m01 as f64 / m00) as f32))
    }
}

/// Finds the dominant color blob in a mask.
///
/// Regions at or below `min_area` pixels are treated as noise. Of the rest,
/// the largest wins; equal areas go to whichever was discovered first in a
/// top-to-bottom, left-to-right scan.
#[derive(Clone, Copy, Debug)]
pub struct BlobTracker {
    min_area: usize,
}

impl Default for BlobTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_AREA)
    }
}

impl BlobTracker {
    pub fn new(min_area: usize) -> Self {
        Self { min_area }
    }

    pub fn min_area(&self) -> usize {
        self.min_area
    }

    /// Every foreground component in discovery order, unfiltered.
    pub fn regions(&self, mask: &Mask) -> Vec<Region> {
        let (w, h) = (mask.width(), mask.height());
        let mut visited = vec![false; w * h];
        let mut regions = Vec::new();
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for y in 0..h {
            for x in 0..w {
                if visited[y * w + x] || !mask.get(x, y) {
                    continue;
                }
                visited[y * w + x] = true;
                stack.push((x, y));
                let mut region = Region {
                    area: 0,
                    m10: 0,
                    m01: 0,
                    min: (x, y),
                    max: (x, y),
                };

                while let Some((cx, cy)) = stack.pop() {
                    region.area += 1;
                    region.m10 += cx as u64;
                    region.m01 += cy as u64;
                    region.min = (region.min.0.min(cx), region.min.1.min(cy));
                    region.max = (region.max.0.max(cx), region.max.1.max(cy));

                    for dy in -1i64..=1 {
                        for dx in -1i64..=1 {
                            if dx == 0 && dy == 0 {
                                continue;
                            }
                            let nx = cx as i64 + dx;
                            let ny = cy as i64 + dy;
                            if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
                                continue;
                            }
                            let (nx, ny) = (nx as usize, ny as usize);
                            if !visited[ny * w + nx] && mask.get(nx, ny) {
                                visited[ny * w + nx] = true;
                                stack.push((nx, ny));
                            }
                        }
                    }
                }
                regions.push(region);
            }
        }
        regions
    }

    /// The region to follow this frame, if any survives the area filter.
    pub fn track(&self, mask: &Mask) -> Option<Region> {
        self.select(self.regions(mask))
    }

    fn select(&self, regions: Vec<Region>) -> Option<Region> {
        regions
            .into_iter()
            .filter(|r| r.area > self.min_area)
            // `max_by_key` keeps the last maximum; reversing keeps the first.
            .rev()
            .max_by_key(|r| r.area)
    }
}
