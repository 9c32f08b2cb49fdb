//! Octree color quantization
//!
//! Builds an octree over the 24-bit RGB cube from every pixel of one frame.
//! Level `L` of the tree resolves bit `7 - L` of each channel, so after
//! [`BITS_PER_CHANNEL`] levels every distinct color owns a leaf. Leaves are
//! then merged bottom-up into their parents until the palette fits, with
//! the clusters that represent the fewest pixels merged first.
//!
//! # Tree layout
//!
//! Nodes live in an arena (`Vec<Node>`) and refer to each other by index.
//! Each child slot is owned by exactly one parent. Leaves are additionally
//! threaded onto an intrusive doubly-linked list (`prev` / `next`) so a
//! merge can unlink a leaf in O(1) and keep the leaf count current.

use crate::quantize::OctreeOptions;
use crate::{QuantizeError, QuantizeResult};
use framequant_core::{Error, Palette, PixelSource, Rgb};

/// Bits per color channel, which is also the depth of the tree.
pub const BITS_PER_CHANNEL: usize = 8;

/// Number of levels whose nodes can absorb their children.
///
/// Nodes created at level 7 are the depth-8 leaves themselves.
const REDUCIBLE_LEVELS: usize = BITS_PER_CHANNEL - 1;

const ROOT: usize = 0;

/// Newly created internal nodes, bucketed by the level they were created at.
type LevelBuckets = [Vec<usize>; REDUCIBLE_LEVELS];

// =============================================================================
// Nodes
// =============================================================================

#[derive(Debug, Clone, Default)]
struct Node {
    children: [Option<usize>; 8],
    red_sum: u64,
    green_sum: u64,
    blue_sum: u64,
    /// Pixels resolved to this node as a leaf; zero for internal nodes.
    ref_count: u64,
    /// Valid only after the palette has been extracted.
    palette_index: u8,
    prev: Option<usize>,
    next: Option<usize>,
}

impl Node {
    #[inline]
    fn is_leaf(&self) -> bool {
        self.ref_count > 0
    }

    /// Truncated mean of every color folded into this leaf.
    fn average_color(&self) -> Rgb {
        Rgb::new(
            (self.red_sum / self.ref_count) as u8,
            (self.green_sum / self.ref_count) as u8,
            (self.blue_sum / self.ref_count) as u8,
        )
    }
}

/// Child slot of `color` at `level`: bit `7 - level` of red, green and blue
/// contribute `0b100`, `0b010` and `0b001`.
#[inline]
fn color_index(color: Rgb, level: usize) -> usize {
    let shift = BITS_PER_CHANNEL - 1 - level;
    let r_bit = ((color.red >> shift) & 1) as usize;
    let g_bit = ((color.green >> shift) & 1) as usize;
    let b_bit = ((color.blue >> shift) & 1) as usize;
    (r_bit << 2) | (g_bit << 1) | b_bit
}

// =============================================================================
// Quantizer
// =============================================================================

/// Octree color quantizer for a single frame.
///
/// The tree is built and reduced in the constructor. Afterwards:
///
/// 1. [`extract_color_palette`](Self::extract_color_palette) produces the
///    palette and assigns each leaf its palette index.
/// 2. [`extract_pixel_color_indices`](Self::extract_pixel_color_indices)
///    maps every pixel of a frame to a palette index. It is meant for the
///    frame the tree was built from; colors that were never inserted still
///    resolve to some palette entry, but not necessarily the nearest one.
///
/// # Examples
///
/// ```
/// use framequant_core::{Frame, Rgb};
/// use framequant_quantize::OctreeColorQuantizer;
///
/// let frame = Frame::from_pixels(3, 1, vec![Rgb::BLACK, Rgb::WHITE, Rgb::BLACK]).unwrap();
/// let mut quantizer = OctreeColorQuantizer::new(&frame).unwrap();
/// let palette = quantizer.color_palette().unwrap();
/// assert_eq!(palette.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct OctreeColorQuantizer {
    nodes: Vec<Node>,
    leaf_head: Option<usize>,
    leaf_count: usize,
    max_colors: usize,
    palette_extracted: bool,
}

impl OctreeColorQuantizer {
    /// Build a quantizer for `source` with the default 256-color limit.
    ///
    /// # Errors
    ///
    /// Returns [`QuantizeError::EmptyFrame`] if `source` has no pixels.
    pub fn new<S: PixelSource + ?Sized>(source: &S) -> QuantizeResult<Self> {
        Self::with_options(source, &OctreeOptions::default())
    }

    /// Build a quantizer for `source` whose palette holds at most
    /// `options.max_colors` colors.
    ///
    /// # Errors
    ///
    /// - [`QuantizeError::InvalidParameters`] if `max_colors` is out of range
    /// - [`QuantizeError::EmptyFrame`] if `source` has no pixels
    pub fn with_options<S: PixelSource + ?Sized>(
        source: &S,
        options: &OctreeOptions,
    ) -> QuantizeResult<Self> {
        options.validate()?;

        let num_pixels = source.num_pixels();
        if num_pixels == 0 {
            return Err(QuantizeError::EmptyFrame);
        }

        let mut quantizer = Self {
            nodes: vec![Node::default()],
            leaf_head: None,
            leaf_count: 0,
            max_colors: options.max_colors as usize,
            palette_extracted: false,
        };

        let mut nodes_per_level = LevelBuckets::default();
        for i in 0..num_pixels {
            quantizer.insert_color(source.pixel_color(i), &mut nodes_per_level);
        }

        let distinct_colors = quantizer.leaf_count;
        let merges = quantizer.reduce(&mut nodes_per_level);

        tracing::debug!(
            pixels = num_pixels,
            distinct_colors,
            merges,
            colors = quantizer.leaf_count,
            "built color octree"
        );

        Ok(quantizer)
    }

    /// Number of colors the palette will have.
    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Palette size limit this quantizer was built with.
    #[inline]
    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    /// Fill `palette` with the quantized colors and assign palette indices.
    ///
    /// `palette` is cleared first. Each entry is the truncated average of
    /// all pixels folded into that leaf. Entries follow the internal leaf
    /// order (most recently created or merged first); callers must not read
    /// any meaning into it.
    ///
    /// Must be called before any pixel lookup.
    pub fn extract_color_palette(&mut self, palette: &mut Palette) -> QuantizeResult<()> {
        palette.clear();

        let mut cursor = self.leaf_head;
        while let Some(id) = cursor {
            let node = &mut self.nodes[id];
            let index = palette.add_color(node.average_color())?;
            node.palette_index =
                u8::try_from(index).map_err(|_| Error::PaletteIndexOutOfRange {
                    index,
                    len: palette.len(),
                })?;
            cursor = node.next;
        }
        self.palette_extracted = true;

        tracing::trace!(colors = palette.len(), "extracted color palette");
        Ok(())
    }

    /// Convenience wrapper around
    /// [`extract_color_palette`](Self::extract_color_palette) returning a
    /// fresh palette.
    pub fn color_palette(&mut self) -> QuantizeResult<Palette> {
        let mut palette = Palette::new();
        self.extract_color_palette(&mut palette)?;
        Ok(palette)
    }

    /// Map every pixel of `source` to its palette index.
    ///
    /// `indices` is cleared and refilled with exactly `source.num_pixels()`
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns [`QuantizeError::PaletteNotExtracted`] if
    /// [`extract_color_palette`](Self::extract_color_palette) has not run.
    pub fn extract_pixel_color_indices<S: PixelSource + ?Sized>(
        &self,
        source: &S,
        indices: &mut Vec<u8>,
    ) -> QuantizeResult<()> {
        if !self.palette_extracted {
            return Err(QuantizeError::PaletteNotExtracted);
        }

        indices.clear();
        indices.reserve(source.num_pixels());
        indices.extend(
            (0..source.num_pixels())
                .map(|i| self.find_color_index_internal(ROOT, source.pixel_color(i), 0)),
        );
        Ok(())
    }

    /// Palette index for a single color.
    ///
    /// # Errors
    ///
    /// Returns [`QuantizeError::PaletteNotExtracted`] if
    /// [`extract_color_palette`](Self::extract_color_palette) has not run.
    pub fn find_color_index(&self, color: Rgb) -> QuantizeResult<u8> {
        if !self.palette_extracted {
            return Err(QuantizeError::PaletteNotExtracted);
        }
        Ok(self.find_color_index_internal(ROOT, color, 0))
    }

    // -------------------------------------------------------------------------
    // Insertion
    // -------------------------------------------------------------------------

    fn insert_color(&mut self, color: Rgb, nodes_per_level: &mut LevelBuckets) {
        self.insert_color_internal(ROOT, color, 0, nodes_per_level);
    }

    fn insert_color_internal(
        &mut self,
        id: usize,
        color: Rgb,
        level: usize,
        nodes_per_level: &mut LevelBuckets,
    ) {
        if level == BITS_PER_CHANNEL {
            let node = &mut self.nodes[id];
            node.red_sum += color.red as u64;
            node.green_sum += color.green as u64;
            node.blue_sum += color.blue as u64;
            node.ref_count += 1;
            if node.ref_count == 1 {
                self.push_leaf(id);
            }
            return;
        }

        let index = color_index(color, level);
        let child = match self.nodes[id].children[index] {
            Some(child) => child,
            None => {
                let child = self.nodes.len();
                self.nodes.push(Node::default());
                self.nodes[id].children[index] = Some(child);
                if level < REDUCIBLE_LEVELS {
                    nodes_per_level[level].push(child);
                }
                child
            }
        };
        self.insert_color_internal(child, color, level + 1, nodes_per_level);
    }

    // -------------------------------------------------------------------------
    // Reduction
    // -------------------------------------------------------------------------

    /// Merge leaves into their parents until the palette fits.
    ///
    /// Returns the number of leaves folded into a parent.
    fn reduce(&mut self, nodes_per_level: &mut LevelBuckets) -> usize {
        let mut merges = 0;
        if self.leaf_count <= self.max_colors {
            return merges;
        }

        for level in (0..REDUCIBLE_LEVELS).rev() {
            let mut candidates = std::mem::take(&mut nodes_per_level[level]);
            candidates.sort_by_cached_key(|&id| self.children_ref_count(id));

            for id in candidates {
                merges += self.merge_children(id);
                if self.leaf_count <= self.max_colors {
                    tracing::trace!(level, leaves = self.leaf_count, "octree reduction done");
                    return merges;
                }
            }
            tracing::trace!(level, leaves = self.leaf_count, "reduced octree level");
        }
        merges
    }

    fn children_ref_count(&self, id: usize) -> u64 {
        self.nodes[id]
            .children
            .iter()
            .flatten()
            .map(|&child| self.nodes[child].ref_count)
            .sum()
    }

    /// Fold every leaf child of `id` into it. Returns how many were folded.
    fn merge_children(&mut self, id: usize) -> usize {
        let mut folded = 0;
        for slot in 0..8 {
            let Some(child) = self.nodes[id].children[slot] else {
                continue;
            };
            if !self.nodes[child].is_leaf() {
                continue;
            }

            let was_leaf = self.nodes[id].is_leaf();
            self.unlink_leaf(child);
            let absorbed = std::mem::take(&mut self.nodes[child]);

            let parent = &mut self.nodes[id];
            parent.red_sum += absorbed.red_sum;
            parent.green_sum += absorbed.green_sum;
            parent.blue_sum += absorbed.blue_sum;
            parent.ref_count += absorbed.ref_count;
            parent.children[slot] = None;

            if !was_leaf {
                self.push_leaf(id);
            }
            folded += 1;
        }
        folded
    }

    // -------------------------------------------------------------------------
    // Leaf list
    // -------------------------------------------------------------------------

    fn push_leaf(&mut self, id: usize) {
        let old_head = self.leaf_head;
        let node = &mut self.nodes[id];
        node.prev = None;
        node.next = old_head;
        if let Some(head) = old_head {
            self.nodes[head].prev = Some(id);
        }
        self.leaf_head = Some(id);
        self.leaf_count += 1;
    }

    fn unlink_leaf(&mut self, id: usize) {
        let node = &mut self.nodes[id];
        let (prev, next) = (node.prev.take(), node.next.take());
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.leaf_head = next,
        }
        if let Some(next) = next {
            self.nodes[next].prev = prev;
        }
        self.leaf_count -= 1;
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    fn find_color_index_internal(&self, id: usize, color: Rgb, level: usize) -> u8 {
        let node = &self.nodes[id];
        if node.is_leaf() {
            return node.palette_index;
        }

        // A pruned path falls back to the nearest present slot: forward
        // first, then backward. This is nearest by index, not by color.
        let index = color_index(color, level);
        let child = node.children[index]
            .or_else(|| node.children[index + 1..].iter().find_map(|&c| c))
            .or_else(|| node.children[..index].iter().rev().find_map(|&c| c));

        match child {
            Some(child) => self.find_color_index_internal(child, color, level + 1),
            None => unreachable!("internal octree node at level {level} has no children"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framequant_core::Frame;

    fn frame_of(pixels: &[Rgb]) -> Frame {
        Frame::from_pixels(pixels.len() as u32, 1, pixels.to_vec()).unwrap()
    }

    fn two_by_two() -> Frame {
        Frame::from_pixels(
            2,
            2,
            vec![
                Rgb::new(0, 0, 0),
                Rgb::new(0, 0, 1),
                Rgb::new(255, 255, 255),
                Rgb::new(255, 255, 254),
            ],
        )
        .unwrap()
    }

    /// Walk the leaf list and the tree and check both agree with the count.
    fn assert_leaf_invariants(q: &OctreeColorQuantizer) {
        let mut listed = 0;
        let mut prev = None;
        let mut cursor = q.leaf_head;
        while let Some(id) = cursor {
            assert!(q.nodes[id].is_leaf());
            assert_eq!(q.nodes[id].prev, prev);
            assert!(q.nodes[id].children.iter().all(Option::is_none));
            listed += 1;
            prev = Some(id);
            cursor = q.nodes[id].next;
        }
        assert_eq!(listed, q.leaf_count);

        let mut reachable = 0;
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            if q.nodes[id].is_leaf() {
                reachable += 1;
            }
            stack.extend(q.nodes[id].children.iter().flatten());
        }
        assert_eq!(reachable, q.leaf_count);
    }

    #[test]
    fn test_color_index_bits() {
        let c = Rgb::new(0b1000_0000, 0b0100_0000, 0b1100_0001);
        assert_eq!(color_index(c, 0), 0b101);
        assert_eq!(color_index(c, 1), 0b011);
        assert_eq!(color_index(c, 7), 0b001);
        assert_eq!(color_index(Rgb::WHITE, 3), 0b111);
        assert_eq!(color_index(Rgb::BLACK, 3), 0);
    }

    #[test]
    fn test_two_by_two_palette_order() {
        let frame = two_by_two();
        let mut q = OctreeColorQuantizer::new(&frame).unwrap();
        assert_eq!(q.leaf_count(), 4);
        assert_leaf_invariants(&q);

        let palette = q.color_palette().unwrap();
        // Leaves are pushed at the head, so the last new color comes first.
        assert_eq!(
            palette.colors(),
            &[
                Rgb::new(255, 255, 254),
                Rgb::new(255, 255, 255),
                Rgb::new(0, 0, 1),
                Rgb::new(0, 0, 0),
            ]
        );

        let mut indices = Vec::new();
        q.extract_pixel_color_indices(&frame, &mut indices).unwrap();
        assert_eq!(indices, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_repeated_colors_share_leaf() {
        let frame = frame_of(&[Rgb::gray(9), Rgb::gray(9), Rgb::gray(9)]);
        let mut q = OctreeColorQuantizer::new(&frame).unwrap();
        assert_eq!(q.leaf_count(), 1);
        assert_eq!(q.color_palette().unwrap().colors(), &[Rgb::gray(9)]);
    }

    #[test]
    fn test_fallback_searches_forward_first() {
        let mut q = OctreeColorQuantizer::new(&two_by_two()).unwrap();
        q.color_palette().unwrap();
        // Root slot 4 is empty; slot 7 is the first present slot after it,
        // and at the last level slot 6 (255,255,254) comes before slot 7.
        assert_eq!(q.find_color_index(Rgb::new(128, 0, 0)).unwrap(), 0);
    }

    #[test]
    fn test_fallback_searches_backward() {
        let mut q = OctreeColorQuantizer::new(&two_by_two()).unwrap();
        q.color_palette().unwrap();
        // At level 6 the color wants slot 1, nothing follows it, and slot 0
        // leads to (0,0,0).
        assert_eq!(q.find_color_index(Rgb::new(0, 0, 2)).unwrap(), 3);
    }

    #[test]
    fn test_reduction_merges_sparse_clusters_first() {
        // 300 singleton colors that agree on their top bits in small
        // groups, plus one heavy color.
        let mut pixels: Vec<Rgb> = (0..300u32)
            .map(|i| Rgb::new((i % 256) as u8, (i / 256) as u8, 7))
            .collect();
        pixels.extend(std::iter::repeat_n(Rgb::new(40, 200, 90), 50));
        let frame = frame_of(&pixels);

        let mut q = OctreeColorQuantizer::new(&frame).unwrap();
        assert!(q.leaf_count() <= 256);
        assert_leaf_invariants(&q);

        let palette = q.color_palette().unwrap();
        assert_eq!(palette.len(), q.leaf_count());
        assert!(palette.colors().contains(&Rgb::new(40, 200, 90)));
    }

    #[test]
    fn test_merged_leaf_is_weighted_average() {
        // Two colors sharing their top seven bits, weighted 1:2, next to
        // seven heavier colors. Eight colors are allowed, so only the pair
        // is merged.
        let light = Rgb::new(100, 101, 100);
        let heavy = Rgb::new(101, 100, 101);
        let mut pixels = vec![light, heavy, heavy];
        for k in 0..7u8 {
            let base = 32 * k;
            pixels.extend(std::iter::repeat_n(Rgb::new(base, 255 - base, 10), 4));
        }
        let frame = frame_of(&pixels);

        let options = OctreeOptions { max_colors: 8 };
        let mut q = OctreeColorQuantizer::with_options(&frame, &options).unwrap();
        assert_eq!(q.leaf_count(), 8);
        assert_leaf_invariants(&q);

        let palette = q.color_palette().unwrap();
        // red (100 + 2 * 101) / 3, green (101 + 2 * 100) / 3, blue as red;
        // every channel truncates to 100.
        assert_eq!(palette.get(0), Some(Rgb::new(100, 100, 100)));
        assert!(!palette.colors().contains(&light));
        assert!(!palette.colors().contains(&heavy));

        assert_eq!(q.find_color_index(light).unwrap(), 0);
        assert_eq!(q.find_color_index(heavy).unwrap(), 0);
    }

    #[test]
    fn test_small_limit_reaches_root_children() {
        let pixels: Vec<Rgb> = (0..=255u8).map(|v| Rgb::new(v, v, 255 - v)).collect();
        let frame = frame_of(&pixels);
        let mut q = OctreeColorQuantizer::with_options(&frame, &OctreeOptions { max_colors: 8 })
            .unwrap();
        assert!(q.leaf_count() <= 8);
        assert_leaf_invariants(&q);

        let palette = q.color_palette().unwrap();
        let mut indices = Vec::new();
        q.extract_pixel_color_indices(&frame, &mut indices).unwrap();
        assert!(indices.iter().all(|&i| (i as usize) < palette.len()));
    }

    #[test]
    fn test_lookup_before_palette_is_error() {
        let frame = two_by_two();
        let q = OctreeColorQuantizer::new(&frame).unwrap();
        let mut indices = Vec::new();
        assert!(matches!(
            q.extract_pixel_color_indices(&frame, &mut indices),
            Err(QuantizeError::PaletteNotExtracted)
        ));
        assert!(matches!(
            q.find_color_index(Rgb::BLACK),
            Err(QuantizeError::PaletteNotExtracted)
        ));
    }

    #[test]
    fn test_empty_source_rejected() {
        let empty: &[Rgb] = &[];
        assert!(matches!(
            OctreeColorQuantizer::new(empty),
            Err(QuantizeError::EmptyFrame)
        ));
    }

    #[test]
    fn test_palette_is_cleared_before_fill() {
        let mut q = OctreeColorQuantizer::new(&two_by_two()).unwrap();
        let mut palette = Palette::from_colors(vec![Rgb::gray(1); 10]).unwrap();
        q.extract_color_palette(&mut palette).unwrap();
        assert_eq!(palette.len(), 4);
    }

    #[test]
    fn test_full_palette_stamps_every_index() {
        let pixels: Vec<Rgb> = (0..=255u8).map(|i| Rgb::new(i, 255 - i, i / 2)).collect();
        let mut q = OctreeColorQuantizer::new(pixels.as_slice()).unwrap();
        assert_eq!(q.leaf_count(), 256);

        let palette = q.color_palette().unwrap();
        assert_eq!(palette.len(), 256);
        for (position, &color) in palette.iter().enumerate() {
            assert_eq!(q.find_color_index(color).unwrap() as usize, position);
        }

        let mut indices = Vec::new();
        q.extract_pixel_color_indices(pixels.as_slice(), &mut indices)
            .unwrap();
        assert!(indices.contains(&255));
    }

    #[test]
    fn test_quantizer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OctreeColorQuantizer>();
    }
}
