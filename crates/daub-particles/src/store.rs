//! Fixed-capacity, ring-buffered, double-buffered particle storage
//!
//! Each generation holds six channel planes laid out as rows of texels, the
//! way a float RGBA texture would be. Slot `n` lives at flat texel index `n`
//! of every plane and at logical grid coordinate `(n % dim, n / dim)`.

use crate::slot::{Channel, Slot, Texel, CHANNEL_COUNT};
use daub_core::{DaubError, FrameTime, RenderContext, Result};

/// Largest supported grid dimension (capacity `MAX_DIM²`)
pub const MAX_DIM: usize = 4096;

/// One channel of one generation: `len` texels stored in rows of `row_texels`
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelPlane {
    texels: Vec<Texel>,
    len: usize,
    row_texels: usize,
}

impl ChannelPlane {
    fn new(len: usize, row_texels: usize) -> Self {
        let rows = len.div_ceil(row_texels);
        Self {
            texels: vec![[0.0; 4]; rows * row_texels],
            len,
            row_texels,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn row_texels(&self) -> usize {
        self.row_texels
    }

    pub fn rows(&self) -> usize {
        self.texels.len() / self.row_texels
    }

    /// The `len` slot texels, in slot order
    pub fn texels(&self) -> &[Texel] {
        &self.texels[..self.len]
    }

    pub fn get(&self, index: usize) -> Texel {
        self.texels[index]
    }

    pub fn row(&self, y: usize) -> &[Texel] {
        let start = y * self.row_texels;
        &self.texels[start..start + self.row_texels]
    }

    /// Raw bytes of every row (including tail padding) for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }

    /// Upload into a single row. Callers never let `data` cross the row end.
    fn upload_row(&mut self, x: usize, y: usize, data: &[Texel]) {
        debug_assert!(x + data.len() <= self.row_texels);
        let start = y * self.row_texels + x;
        self.texels[start..start + data.len()].copy_from_slice(data);
    }

    /// Upload a run of texels starting at flat index `start`. A run that
    /// crosses a row boundary puts its head on the current row and the
    /// remainder at the start of the next row (row index wraps).
    fn write_span(&mut self, start: usize, data: &[Texel]) {
        let rows = self.rows();
        let mut x = start % self.row_texels;
        let mut y = start / self.row_texels;
        let mut rest = data;
        while !rest.is_empty() {
            let space = self.row_texels - x;
            let (head, tail) = rest.split_at(space.min(rest.len()));
            self.upload_row(x, y, head);
            rest = tail;
            x = 0;
            y = (y + 1) % rows;
        }
    }
}

/// One complete buffer of particle state (all six channel planes)
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    planes: [ChannelPlane; CHANNEL_COUNT],
}

impl Generation {
    fn new(len: usize, row_texels: usize) -> Self {
        Self {
            planes: std::array::from_fn(|_| ChannelPlane::new(len, row_texels)),
        }
    }

    pub fn len(&self) -> usize {
        self.planes[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn plane(&self, channel: Channel) -> &ChannelPlane {
        &self.planes[channel.index()]
    }

    pub fn planes(&self) -> &[ChannelPlane; CHANNEL_COUNT] {
        &self.planes
    }

    /// Gather slot `index` from every channel
    pub fn slot(&self, index: usize) -> Slot {
        Slot::new(std::array::from_fn(|c| self.planes[c].get(index)))
    }

    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..self.len()).map(move |i| self.slot(i))
    }

    fn set_slot(&mut self, index: usize, slot: &Slot) {
        for (plane, texel) in self.planes.iter_mut().zip(slot.channels) {
            plane.texels[index] = texel;
        }
    }

    /// One span upload per channel for a run of consecutive slots
    fn write_run(&mut self, start: usize, slots: &[Slot]) {
        let mut run: Vec<Texel> = Vec::with_capacity(slots.len());
        for (c, plane) in self.planes.iter_mut().enumerate() {
            run.clear();
            run.extend(slots.iter().map(|s| s.channels[c]));
            plane.write_span(start, &run);
        }
    }

    /// Apply `transition` to every slot, producing a new generation
    pub fn map_slots<F>(&self, transition: F, time: FrameTime) -> Generation
    where
        F: Fn(&Slot, FrameTime) -> Slot + Sync,
    {
        let mut out = self.clone();
        transition_into(self, &mut out, &transition, time);
        out
    }
}

#[cfg(not(feature = "parallel"))]
fn transition_into<F>(src: &Generation, dst: &mut Generation, transition: &F, time: FrameTime)
where
    F: Fn(&Slot, FrameTime) -> Slot + Sync,
{
    for i in 0..src.len() {
        let next = transition(&src.slot(i), time);
        dst.set_slot(i, &next);
    }
}

#[cfg(feature = "parallel")]
fn transition_into<F>(src: &Generation, dst: &mut Generation, transition: &F, time: FrameTime)
where
    F: Fn(&Slot, FrameTime) -> Slot + Sync,
{
    use rayon::prelude::*;

    let next: Vec<Slot> = (0..src.len())
        .into_par_iter()
        .map(|i| transition(&src.slot(i), time))
        .collect();
    for (i, slot) in next.iter().enumerate() {
        dst.set_slot(i, slot);
    }
}

/// Double-buffered ring of `dim × dim` particle slots
#[derive(Debug, Clone)]
pub struct ParticleStore {
    dim: usize,
    row_texels: usize,
    generations: Vec<Generation>,
    /// Index into `generations` of the current generation
    current: usize,
    write_cursor: usize,
}

impl ParticleStore {
    /// Create a store with both generations allocated and zeroed
    pub fn new(ctx: &RenderContext, dim: usize) -> Result<Self> {
        let mut store = Self::deferred(ctx, dim)?;
        store.init_buffers()?;
        Ok(store)
    }

    /// Create a store whose generations are allocated later by `init_buffers`
    pub fn deferred(ctx: &RenderContext, dim: usize) -> Result<Self> {
        if dim == 0 || dim > MAX_DIM {
            return Err(DaubError::InvalidConfig(format!(
                "simulation dim must be in 1..={MAX_DIM}, got {dim}"
            )));
        }
        Ok(Self {
            dim,
            row_texels: dim.min(ctx.max_row_texels),
            generations: Vec::with_capacity(2),
            current: 0,
            write_cursor: 0,
        })
    }

    /// Allocate the current and previous generations
    pub fn init_buffers(&mut self) -> Result<()> {
        if self.is_initialized() {
            return Err(DaubError::InvalidConfig(
                "simulation already initialized".to_string(),
            ));
        }
        let capacity = self.capacity();
        self.generations = vec![
            Generation::new(capacity, self.row_texels),
            Generation::new(capacity, self.row_texels),
        ];
        self.current = 0;
        log::debug!(
            "allocated particle store: {}x{} slots, {} texels per row",
            self.dim,
            self.dim,
            self.row_texels
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.generations.len() == 2
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn capacity(&self) -> usize {
        self.dim * self.dim
    }

    pub fn row_texels(&self) -> usize {
        self.row_texels
    }

    /// The next slot to receive a write
    pub fn write_cursor(&self) -> usize {
        self.write_cursor
    }

    /// Logical grid coordinate of slot `n`
    pub fn slot_coord(&self, n: usize) -> (usize, usize) {
        (n % self.dim, n / self.dim)
    }

    /// The generation just produced by `integrate`, safe to render
    pub fn current(&self) -> Option<&Generation> {
        self.generations.get(self.current)
    }

    /// The generation receiving writes and feeding the next `integrate`
    pub fn previous(&self) -> Option<&Generation> {
        self.generations.get(1 - self.current)
    }

    /// Read back slot `n` of the previous generation
    pub fn slot(&self, n: usize) -> Option<Slot> {
        self.previous().filter(|_| n < self.capacity()).map(|g| g.slot(n))
    }

    /// Raw bytes of one channel of the current generation
    pub fn channel_bytes(&self, channel: Channel) -> Option<&[u8]> {
        self.current().map(|g| g.plane(channel).as_bytes())
    }

    /// Write one particle at the cursor and advance it
    pub fn write(&mut self, slot: &Slot) {
        self.write_batch(std::slice::from_ref(slot));
    }

    /// Write consecutive particles starting at the cursor. Equivalent to
    /// calling `write` for each slot in order, with one span upload per
    /// channel per contiguous run.
    pub fn write_batch(&mut self, slots: &[Slot]) {
        if !self.is_initialized() {
            log::error!("particle write before simulation initialized");
            return;
        }
        let capacity = self.capacity();
        // only the newest `capacity` records of an oversized batch survive
        let skip = slots.len().saturating_sub(capacity);
        let mut cursor = (self.write_cursor + skip) % capacity;
        let mut rest = &slots[skip..];

        let previous = &mut self.generations[1 - self.current];
        while !rest.is_empty() {
            let run = (capacity - cursor).min(rest.len());
            let (head, tail) = rest.split_at(run);
            previous.write_run(cursor, head);
            cursor = (cursor + run) % capacity;
            rest = tail;
        }
        self.write_cursor = cursor;
    }

    /// Apply `transition` to every slot of `previous`, writing into `current`
    pub fn integrate<F>(&mut self, transition: F, time: FrameTime)
    where
        F: Fn(&Slot, FrameTime) -> Slot + Sync,
    {
        if !self.is_initialized() {
            log::error!("integrate before simulation initialized");
            return;
        }
        let (src, dst) = self.split_generations();
        transition_into(src, dst, &transition, time);
    }

    /// Exchange the current and previous labels
    pub fn swap(&mut self) {
        if self.is_initialized() {
            self.current = 1 - self.current;
        } else {
            log::error!("simulation not yet initialized");
        }
    }

    /// `(previous, current)`
    fn split_generations(&mut self) -> (&Generation, &mut Generation) {
        let (first, second) = self.generations.split_at_mut(1);
        if self.current == 0 {
            (&second[0], &mut first[0])
        } else {
            (&first[0], &mut second[0])
        }
    }
}
