//! Particle slot layout: six independent four-component channels

use bytemuck::{Pod, Zeroable};

/// One four-component channel value (one RGBA float texel on the GPU)
pub type Texel = [f32; 4];

pub const CHANNEL_COUNT: usize = 6;

/// The six per-slot channels, in storage order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// x, y, dx, dy
    Motion = 0,
    /// ax, ay, decay, unused
    Force = 1,
    /// r, g, b, birth time
    Birth = 2,
    /// r, g, b, death time
    Death = 3,
    /// size, pulse frequency, unused, unused
    Shape = 4,
    /// spawn angle, jitter magnitude, unused, unused
    Spawn = 5,
}

impl Channel {
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Motion,
        Channel::Force,
        Channel::Birth,
        Channel::Death,
        Channel::Shape,
        Channel::Spawn,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One particle's full record: 96 bytes, six rows of vec4.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Slot {
    pub channels: [Texel; CHANNEL_COUNT],
}

impl Slot {
    pub fn new(channels: [Texel; CHANNEL_COUNT]) -> Self {
        Self { channels }
    }

    pub fn channel(&self, channel: Channel) -> Texel {
        self.channels[channel.index()]
    }

    pub fn position(&self) -> [f32; 2] {
        let m = self.channels[0];
        [m[0], m[1]]
    }

    pub fn velocity(&self) -> [f32; 2] {
        let m = self.channels[0];
        [m[2], m[3]]
    }

    pub fn accel(&self) -> [f32; 2] {
        let f = self.channels[1];
        [f[0], f[1]]
    }

    pub fn decay(&self) -> f32 {
        self.channels[1][2]
    }

    pub fn birth_color(&self) -> [f32; 3] {
        let b = self.channels[2];
        [b[0], b[1], b[2]]
    }

    pub fn birth_time(&self) -> f32 {
        self.channels[2][3]
    }

    pub fn death_color(&self) -> [f32; 3] {
        let d = self.channels[3];
        [d[0], d[1], d[2]]
    }

    pub fn death_time(&self) -> f32 {
        self.channels[3][3]
    }

    pub fn size(&self) -> f32 {
        self.channels[4][0]
    }

    pub fn pulse(&self) -> f32 {
        self.channels[4][1]
    }

    pub fn spawn_angle(&self) -> f32 {
        self.channels[5][0]
    }

    pub fn jitter(&self) -> f32 {
        self.channels[5][1]
    }

    pub fn set_motion(&mut self, position: [f32; 2], velocity: [f32; 2]) {
        self.channels[0] = [position[0], position[1], velocity[0], velocity[1]];
    }
}

/// Named fields of a freshly injected particle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParticleSpawn {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub accel: [f32; 2],
    pub decay: f32,
    pub birth_color: [f32; 3],
    pub birth_time: f32,
    pub death_color: [f32; 3],
    pub death_time: f32,
    pub size: f32,
    pub pulse: f32,
    pub spawn_angle: f32,
    pub jitter: f32,
}

impl ParticleSpawn {
    pub fn to_slot(&self) -> Slot {
        let [r0, g0, b0] = self.birth_color;
        let [r1, g1, b1] = self.death_color;
        Slot::new([
            [self.position[0], self.position[1], self.velocity[0], self.velocity[1]],
            [self.accel[0], self.accel[1], self.decay, 0.0],
            [r0, g0, b0, self.birth_time],
            [r1, g1, b1, self.death_time],
            [self.size, self.pulse, 0.0, 0.0],
            [self.spawn_angle, self.jitter, 0.0, 0.0],
        ])
    }
}

impl From<ParticleSpawn> for Slot {
    fn from(spawn: ParticleSpawn) -> Self {
        spawn.to_slot()
    }
}
