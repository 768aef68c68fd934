// APU module - Audio Processing Unit implementation
//
// This module contains the APU emulation for the NES (Ricoh 2A03).
//
// # APU Registers
//
// The APU has multiple registers mapped at $4000-$4017 in CPU memory space.
// All five channels (two pulse, triangle, noise, DMC) and the frame
// sequencer are fully implemented.
//
// ## Register Map
//
// ### Pulse 1 ($4000-$4003)
// | Address | Description                           |
// |---------|---------------------------------------|
// | $4000   | Duty cycle, envelope                  |
// | $4001   | Sweep unit                            |
// | $4002   | Timer low byte                        |
// | $4003   | Length counter, timer high bits       |
//
// ### Pulse 2 ($4004-$4007)
// | Address | Description                           |
// |---------|---------------------------------------|
// | $4004   | Duty cycle, envelope                  |
// | $4005   | Sweep unit                            |
// | $4006   | Timer low byte                        |
// | $4007   | Length counter, timer high bits       |
//
// ### Triangle ($4008-$400B)
// | Address | Description                           |
// |---------|---------------------------------------|
// | $4008   | Linear counter                        |
// | $4009   | Unused                                |
// | $400A   | Timer low byte                        |
// | $400B   | Length counter, timer high bits       |
//
// ### Noise ($400C-$400F)
// | Address | Description                           |
// |---------|---------------------------------------|
// | $400C   | Envelope                              |
// | $400D   | Unused                                |
// | $400E   | Mode, period                          |
// | $400F   | Length counter                        |
//
// ### DMC ($4010-$4013)
// | Address | Description                           |
// |---------|---------------------------------------|
// | $4010   | Flags, rate                           |
// | $4011   | Direct load                           |
// | $4012   | Sample address                        |
// | $4013   | Sample length                         |
//
// ### Control ($4015, $4017)
// | Address | Description                           |
// |---------|---------------------------------------|
// | $4015   | Status/Control (R/W)                  |
// | $4017   | Frame counter (W)                     |

use crate::bus::MemoryMappedDevice;
use serde::{Deserialize, Serialize};

// ============================================================================
// Pulse Channel Implementation
// ============================================================================

/// Length counter lookup table
/// Maps the 5-bit length counter load value to the actual counter value
const LENGTH_COUNTER_TABLE: [u8; 32] = [
    10, 254, 20, 2, 40, 4, 80, 6, 160, 8, 60, 10, 14, 12, 26, 14, 12, 16, 24, 18, 48, 20, 96, 22,
    192, 24, 72, 26, 16, 28, 32, 30,
];

/// Duty cycle patterns for pulse channels
/// Each pattern is 8 steps, representing one full cycle of the square wave
const DUTY_PATTERNS: [[u8; 8]; 4] = [
    [0, 1, 0, 0, 0, 0, 0, 0], // 12.5% duty cycle
    [0, 1, 1, 0, 0, 0, 0, 0], // 25% duty cycle
    [0, 1, 1, 1, 1, 0, 0, 0], // 50% duty cycle
    [1, 0, 0, 1, 1, 1, 1, 1], // 75% duty cycle (inverted 25%)
];

/// Envelope generator for controlling volume over time
#[derive(Debug, Clone)]
struct Envelope {
    /// Start flag - set when length counter is loaded
    start: bool,
    /// Divider counter
    divider: u8,
    /// Decay level counter (0-15)
    decay_level: u8,
    /// Period for the divider
    period: u8,
    /// Loop flag (from register bit 5)
    loop_flag: bool,
    /// Constant volume flag (from register bit 4)
    constant_volume: bool,
}

impl Envelope {
    fn new() -> Self {
        Self {
            start: false,
            divider: 0,
            decay_level: 0,
            period: 0,
            loop_flag: false,
            constant_volume: false,
        }
    }

    /// Clock the envelope generator (called by frame sequencer)
    fn clock(&mut self) {
        if self.start {
            self.start = false;
            self.decay_level = 15;
            self.divider = self.period;
        } else if self.divider > 0 {
            self.divider -= 1;
        } else {
            self.divider = self.period;
            if self.decay_level > 0 {
                self.decay_level -= 1;
            } else if self.loop_flag {
                self.decay_level = 15;
            }
        }
    }

    /// Get the current volume (0-15)
    fn volume(&self) -> u8 {
        if self.constant_volume {
            self.period // When constant volume is set, period becomes the volume
        } else {
            self.decay_level
        }
    }

    /// Write to the envelope control register
    fn write_control(&mut self, data: u8) {
        self.loop_flag = (data & 0x20) != 0;
        self.constant_volume = (data & 0x10) != 0;
        self.period = data & 0x0F;
    }

    /// Restart the envelope
    fn restart(&mut self) {
        self.start = true;
    }
}

/// Snapshot of an [`Envelope`]'s state, used by save states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct EnvelopeState {
    start: bool,
    divider: u8,
    decay_level: u8,
    period: u8,
    loop_flag: bool,
    constant_volume: bool,
}

impl Envelope {
    fn export(&self) -> EnvelopeState {
        EnvelopeState {
            start: self.start,
            divider: self.divider,
            decay_level: self.decay_level,
            period: self.period,
            loop_flag: self.loop_flag,
            constant_volume: self.constant_volume,
        }
    }

    fn import(&mut self, state: &EnvelopeState) {
        self.start = state.start;
        self.divider = state.divider;
        self.decay_level = state.decay_level;
        self.period = state.period;
        self.loop_flag = state.loop_flag;
        self.constant_volume = state.constant_volume;
    }
}

/// Sweep unit for pitch bending
#[derive(Debug, Clone)]
struct Sweep {
    /// Enabled flag
    enabled: bool,
    /// Divider counter
    divider: u8,
    /// Period for the divider
    period: u8,
    /// Negate flag (pitch bend direction)
    negate: bool,
    /// Shift amount
    shift: u8,
    /// Reload flag
    reload: bool,
    /// Channel number (1 or 2) - affects negate calculation
    channel: u8,
}

impl Sweep {
    fn new(channel: u8) -> Self {
        Self {
            enabled: false,
            divider: 0,
            period: 0,
            negate: false,
            shift: 0,
            reload: false,
            channel,
        }
    }

    /// Calculate the target period for the sweep
    fn calculate_target_period(&self, current_period: u16) -> u16 {
        let change = current_period >> self.shift;
        if self.negate {
            // Pulse 1 uses one's complement, Pulse 2 uses two's complement
            if self.channel == 1 {
                current_period.wrapping_sub(change).wrapping_sub(1)
            } else {
                current_period.wrapping_sub(change)
            }
        } else {
            current_period.wrapping_add(change)
        }
    }

    /// Check if the sweep unit is muting the channel
    fn is_muting(&self, current_period: u16) -> bool {
        // Mute if current period < 8 or target period > 0x7FF
        current_period < 8 || self.calculate_target_period(current_period) > 0x7FF
    }

    /// Clock the sweep unit (called by frame sequencer)
    /// Returns Some(new_period) if period should be updated
    fn clock(&mut self, current_period: u16) -> Option<u16> {
        let mut update_period = None;

        // Only update period if shift > 0; muting still applies even when shift == 0
        if self.divider == 0 && self.enabled && self.shift > 0 && !self.is_muting(current_period) {
            update_period = Some(self.calculate_target_period(current_period));
        }

        if self.divider == 0 || self.reload {
            self.divider = self.period;
            self.reload = false;
        } else {
            self.divider -= 1;
        }

        update_period
    }

    /// Write to the sweep control register
    fn write_control(&mut self, data: u8) {
        self.enabled = (data & 0x80) != 0;
        self.period = (data >> 4) & 0x07;
        self.negate = (data & 0x08) != 0;
        self.shift = data & 0x07;
        self.reload = true;
    }
}

/// Snapshot of a [`Sweep`] unit's state, used by save states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SweepState {
    enabled: bool,
    divider: u8,
    period: u8,
    negate: bool,
    shift: u8,
    reload: bool,
    channel: u8,
}

impl Sweep {
    fn export(&self) -> SweepState {
        SweepState {
            enabled: self.enabled,
            divider: self.divider,
            period: self.period,
            negate: self.negate,
            shift: self.shift,
            reload: self.reload,
            channel: self.channel,
        }
    }

    fn import(&mut self, state: &SweepState) {
        self.enabled = state.enabled;
        self.divider = state.divider;
        self.period = state.period;
        self.negate = state.negate;
        self.shift = state.shift;
        self.reload = state.reload;
        self.channel = state.channel;
    }
}

/// Length counter for controlling note duration
#[derive(Debug, Clone)]
struct LengthCounter {
    /// Counter value
    counter: u8,
    /// Halt flag (from envelope control register bit 5)
    halt: bool,
}

impl LengthCounter {
    fn new() -> Self {
        Self {
            counter: 0,
            halt: false,
        }
    }

    /// Clock the length counter (called by frame sequencer)
    fn clock(&mut self) {
        if !self.halt && self.counter > 0 {
            self.counter -= 1;
        }
    }

    /// Load a new counter value from the length counter table
    fn load(&mut self, index: u8) {
        self.counter = LENGTH_COUNTER_TABLE[(index & 0x1F) as usize];
    }

    /// Check if the length counter is non-zero
    fn is_active(&self) -> bool {
        self.counter > 0
    }

    /// Set the halt flag
    fn set_halt(&mut self, halt: bool) {
        self.halt = halt;
    }
}

/// Snapshot of a [`LengthCounter`]'s state, used by save states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LengthCounterState {
    counter: u8,
    halt: bool,
}

impl LengthCounter {
    fn export(&self) -> LengthCounterState {
        LengthCounterState {
            counter: self.counter,
            halt: self.halt,
        }
    }

    fn import(&mut self, state: &LengthCounterState) {
        self.counter = state.counter;
        self.halt = state.halt;
    }
}

/// Timer for controlling the frequency of the pulse wave
#[derive(Debug, Clone)]
struct Timer {
    /// Period (11-bit value)
    period: u16,
    /// Current counter value
    counter: u16,
}

impl Timer {
    fn new() -> Self {
        Self {
            period: 0,
            counter: 0,
        }
    }

    /// Clock the timer
    /// Returns true when the timer reaches 0
    fn clock(&mut self) -> bool {
        if self.counter == 0 {
            self.counter = self.period;
            true
        } else {
            self.counter -= 1;
            false
        }
    }

    /// Set the period from low and high bytes
    fn set_period(&mut self, low: u8, high: u8) {
        self.period = (low as u16) | ((high as u16 & 0x07) << 8);
    }

    /// Set the period directly
    fn set_period_direct(&mut self, period: u16) {
        self.period = period;
    }
}

/// Snapshot of a [`Timer`]'s state, used by save states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TimerState {
    period: u16,
    counter: u16,
}

impl Timer {
    fn export(&self) -> TimerState {
        TimerState {
            period: self.period,
            counter: self.counter,
        }
    }

    fn import(&mut self, state: &TimerState) {
        self.period = state.period;
        self.counter = state.counter;
    }
}

/// Pulse wave channel (used for both Pulse 1 and Pulse 2)
#[derive(Debug, Clone)]
struct PulseChannel {
    /// Enabled flag (from $4015)
    enabled: bool,
    /// Duty cycle (0-3)
    duty: u8,
    /// Duty cycle sequence position (0-7)
    duty_position: u8,
    /// Envelope generator
    envelope: Envelope,
    /// Sweep unit
    sweep: Sweep,
    /// Length counter
    length_counter: LengthCounter,
    /// Timer
    timer: Timer,
}

impl PulseChannel {
    /// Create a new pulse channel
    /// `channel_number` should be 1 or 2 and affects the sweep unit's negate behavior
    fn new(channel_number: u8) -> Self {
        Self {
            enabled: false,
            duty: 0,
            duty_position: 0,
            envelope: Envelope::new(),
            sweep: Sweep::new(channel_number),
            length_counter: LengthCounter::new(),
            timer: Timer::new(),
        }
    }

    /// Write to register 0 (duty cycle and envelope)
    fn write_register_0(&mut self, data: u8) {
        self.duty = (data >> 6) & 0x03;
        self.length_counter.set_halt((data & 0x20) != 0);
        self.envelope.write_control(data);
    }

    /// Write to register 1 (sweep unit)
    fn write_register_1(&mut self, data: u8) {
        self.sweep.write_control(data);
    }

    /// Write to register 2 (timer low byte)
    fn write_register_2(&mut self, data: u8) {
        let high = (self.timer.period >> 8) as u8;
        self.timer.set_period(data, high);
    }

    /// Write to register 3 (length counter and timer high)
    fn write_register_3(&mut self, data: u8) {
        let low = self.timer.period as u8;
        self.timer.set_period(low, data & 0x07);

        // Load length counter if channel is enabled
        if self.enabled {
            self.length_counter.load(data >> 3);
        }

        // Restart envelope and reset duty position
        self.envelope.restart();
        self.duty_position = 0;
    }

    /// Set the enabled flag (from $4015)
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length_counter.counter = 0;
        }
    }

    /// Check if the channel is enabled and producing sound
    fn is_active(&self) -> bool {
        self.enabled && self.length_counter.is_active()
    }

    /// Clock the timer and update duty position
    fn clock_timer(&mut self) {
        if self.timer.clock() {
            self.duty_position = (self.duty_position + 1) % 8;
        }
    }

    /// Clock the envelope (called by frame sequencer)
    fn clock_envelope(&mut self) {
        self.envelope.clock();
    }

    /// Clock the length counter (called by frame sequencer)
    fn clock_length_counter(&mut self) {
        self.length_counter.clock();
    }

    /// Clock the sweep unit (called by frame sequencer)
    fn clock_sweep(&mut self) {
        if let Some(new_period) = self.sweep.clock(self.timer.period) {
            self.timer.set_period_direct(new_period);
        }
    }

    /// Get the current output sample (0 or volume)
    fn output(&self) -> u8 {
        // Check if channel should be muted
        if !self.is_active() {
            return 0;
        }

        // Check if sweep is muting
        if self.sweep.is_muting(self.timer.period) {
            return 0;
        }

        // Get duty cycle value
        let duty_output = DUTY_PATTERNS[self.duty as usize][self.duty_position as usize];

        if duty_output == 0 {
            0
        } else {
            self.envelope.volume()
        }
    }

    fn export(&self) -> PulseChannelState {
        PulseChannelState {
            enabled: self.enabled,
            duty: self.duty,
            duty_position: self.duty_position,
            envelope: self.envelope.export(),
            sweep: self.sweep.export(),
            length_counter: self.length_counter.export(),
            timer: self.timer.export(),
        }
    }

    fn import(&mut self, state: &PulseChannelState) {
        self.enabled = state.enabled;
        self.duty = state.duty;
        self.duty_position = state.duty_position;
        self.envelope.import(&state.envelope);
        self.sweep.import(&state.sweep);
        self.length_counter.import(&state.length_counter);
        self.timer.import(&state.timer);
    }
}

/// Snapshot of a [`PulseChannel`]'s state, used by save states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PulseChannelState {
    enabled: bool,
    duty: u8,
    duty_position: u8,
    envelope: EnvelopeState,
    sweep: SweepState,
    length_counter: LengthCounterState,
    timer: TimerState,
}

/// Linear counter, used by the triangle channel in place of an envelope.
#[derive(Debug, Clone)]
struct LinearCounter {
    counter: u8,
    reload_value: u8,
    reload_flag: bool,
    control_flag: bool,
}

impl LinearCounter {
    fn new() -> Self {
        Self {
            counter: 0,
            reload_value: 0,
            reload_flag: false,
            control_flag: false,
        }
    }

    fn clock(&mut self) {
        if self.reload_flag {
            self.counter = self.reload_value;
        } else if self.counter > 0 {
            self.counter -= 1;
        }
        if !self.control_flag {
            self.reload_flag = false;
        }
    }

    fn write_control(&mut self, data: u8) {
        self.control_flag = (data & 0x80) != 0;
        self.reload_value = data & 0x7F;
    }

    fn is_active(&self) -> bool {
        self.counter > 0
    }

    fn export(&self) -> LinearCounterState {
        LinearCounterState {
            counter: self.counter,
            reload_value: self.reload_value,
            reload_flag: self.reload_flag,
            control_flag: self.control_flag,
        }
    }

    fn import(&mut self, state: &LinearCounterState) {
        self.counter = state.counter;
        self.reload_value = state.reload_value;
        self.reload_flag = state.reload_flag;
        self.control_flag = state.control_flag;
    }
}

/// Snapshot of a [`LinearCounter`]'s state, used by save states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LinearCounterState {
    counter: u8,
    reload_value: u8,
    reload_flag: bool,
    control_flag: bool,
}

/// The 32-step triangle wave sequence (descending then ascending 4-bit ramp).
const TRIANGLE_SEQUENCE: [u8; 32] = [
    15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12,
    13, 14, 15,
];

/// Triangle wave channel.
#[derive(Debug, Clone)]
struct TriangleChannel {
    enabled: bool,
    linear_counter: LinearCounter,
    length_counter: LengthCounter,
    timer: Timer,
    sequence_position: u8,
}

impl TriangleChannel {
    fn new() -> Self {
        Self {
            enabled: false,
            linear_counter: LinearCounter::new(),
            length_counter: LengthCounter::new(),
            timer: Timer::new(),
            sequence_position: 0,
        }
    }

    /// $4008: linear counter control (also doubles as the length counter halt flag).
    fn write_register_0(&mut self, data: u8) {
        self.linear_counter.write_control(data);
        self.length_counter.set_halt((data & 0x80) != 0);
    }

    /// $400A: timer low byte.
    fn write_register_2(&mut self, data: u8) {
        let high = (self.timer.period >> 8) as u8;
        self.timer.set_period(data, high);
    }

    /// $400B: length counter load, timer high bits.
    fn write_register_3(&mut self, data: u8) {
        let low = self.timer.period as u8;
        self.timer.set_period(low, data & 0x07);

        if self.enabled {
            self.length_counter.load(data >> 3);
        }
        self.linear_counter.reload_flag = true;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length_counter.counter = 0;
        }
    }

    fn is_active(&self) -> bool {
        self.enabled && self.length_counter.is_active()
    }

    /// The sequencer only advances while both the length and linear counters are alive.
    fn clock_timer(&mut self) {
        if self.timer.clock() && self.length_counter.is_active() && self.linear_counter.is_active()
        {
            self.sequence_position = (self.sequence_position + 1) % 32;
        }
    }

    fn clock_linear_counter(&mut self) {
        self.linear_counter.clock();
    }

    fn clock_length_counter(&mut self) {
        self.length_counter.clock();
    }

    fn output(&self) -> u8 {
        TRIANGLE_SEQUENCE[self.sequence_position as usize]
    }

    fn export(&self) -> TriangleChannelState {
        TriangleChannelState {
            enabled: self.enabled,
            linear_counter: self.linear_counter.export(),
            length_counter: self.length_counter.export(),
            timer: self.timer.export(),
            sequence_position: self.sequence_position,
        }
    }

    fn import(&mut self, state: &TriangleChannelState) {
        self.enabled = state.enabled;
        self.linear_counter.import(&state.linear_counter);
        self.length_counter.import(&state.length_counter);
        self.timer.import(&state.timer);
        self.sequence_position = state.sequence_position;
    }
}

/// Snapshot of a [`TriangleChannel`]'s state, used by save states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TriangleChannelState {
    enabled: bool,
    linear_counter: LinearCounterState,
    length_counter: LengthCounterState,
    timer: TimerState,
    sequence_position: u8,
}

/// NTSC noise channel timer periods, indexed by the 4-bit period field of $400E.
const NOISE_PERIOD_TABLE: [u16; 16] = [
    4, 8, 16, 32, 64, 96, 128, 160, 202, 254, 380, 508, 762, 1016, 2034, 4068,
];

/// Pseudo-random noise channel, driven by a 15-bit linear feedback shift register.
#[derive(Debug, Clone)]
struct NoiseChannel {
    enabled: bool,
    envelope: Envelope,
    length_counter: LengthCounter,
    timer: Timer,
    /// Never zero - see the LFSR invariant in `clock_timer`.
    shift_register: u16,
    /// Short-period ("metallic") mode, tapping bit 6 instead of bit 1.
    mode: bool,
}

impl NoiseChannel {
    fn new() -> Self {
        Self {
            enabled: false,
            envelope: Envelope::new(),
            length_counter: LengthCounter::new(),
            timer: Timer::new(),
            shift_register: 1,
            mode: false,
        }
    }

    /// $400C: envelope control.
    fn write_register_0(&mut self, data: u8) {
        self.length_counter.set_halt((data & 0x20) != 0);
        self.envelope.write_control(data);
    }

    /// $400E: mode flag and timer period.
    fn write_register_2(&mut self, data: u8) {
        self.mode = (data & 0x80) != 0;
        self.timer
            .set_period_direct(NOISE_PERIOD_TABLE[(data & 0x0F) as usize]);
    }

    /// $400F: length counter load.
    fn write_register_3(&mut self, data: u8) {
        if self.enabled {
            self.length_counter.load(data >> 3);
        }
        self.envelope.restart();
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length_counter.counter = 0;
        }
    }

    fn is_active(&self) -> bool {
        self.enabled && self.length_counter.is_active()
    }

    fn clock_timer(&mut self) {
        if !self.timer.clock() {
            return;
        }
        let tap = if self.mode { 6 } else { 1 };
        let feedback = (self.shift_register & 1) ^ ((self.shift_register >> tap) & 1);
        self.shift_register >>= 1;
        self.shift_register |= feedback << 14;
    }

    fn clock_envelope(&mut self) {
        self.envelope.clock();
    }

    fn clock_length_counter(&mut self) {
        self.length_counter.clock();
    }

    fn output(&self) -> u8 {
        if !self.is_active() || (self.shift_register & 1) != 0 {
            0
        } else {
            self.envelope.volume()
        }
    }

    fn export(&self) -> NoiseChannelState {
        NoiseChannelState {
            enabled: self.enabled,
            envelope: self.envelope.export(),
            length_counter: self.length_counter.export(),
            timer: self.timer.export(),
            shift_register: self.shift_register,
            mode: self.mode,
        }
    }

    fn import(&mut self, state: &NoiseChannelState) {
        self.enabled = state.enabled;
        self.envelope.import(&state.envelope);
        self.length_counter.import(&state.length_counter);
        self.timer.import(&state.timer);
        self.shift_register = state.shift_register;
        self.mode = state.mode;
    }
}

/// Snapshot of a [`NoiseChannel`]'s state, used by save states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct NoiseChannelState {
    enabled: bool,
    envelope: EnvelopeState,
    length_counter: LengthCounterState,
    timer: TimerState,
    shift_register: u16,
    mode: bool,
}

/// NTSC DMC timer periods (CPU cycles per output bit), indexed by $4010's rate field.
const DMC_RATE_TABLE: [u16; 16] = [
    428, 380, 340, 320, 286, 254, 226, 214, 190, 160, 142, 128, 106, 84, 72, 54,
];

/// Delta modulation channel. Plays back a 1-bit delta-coded PCM sample fetched
/// directly from CPU address space ($C000-$FFFF), bypassing the other channels'
/// register-driven model.
#[derive(Debug, Clone)]
struct DmcChannel {
    irq_enable: bool,
    loop_flag: bool,
    timer: Timer,
    output_level: u8,
    sample_address: u16,
    sample_length: u16,
    current_address: u16,
    bytes_remaining: u16,
    sample_buffer: Option<u8>,
    shift_register: u8,
    bits_remaining: u8,
    silence: bool,
    irq_flag: bool,
}

impl DmcChannel {
    fn new() -> Self {
        Self {
            irq_enable: false,
            loop_flag: false,
            timer: Timer::new(),
            output_level: 0,
            sample_address: 0xC000,
            sample_length: 1,
            current_address: 0xC000,
            bytes_remaining: 0,
            sample_buffer: None,
            shift_register: 0,
            bits_remaining: 8,
            silence: true,
            irq_flag: false,
        }
    }

    /// $4010: IRQ enable, loop flag, playback rate.
    fn write_control(&mut self, data: u8) {
        self.irq_enable = (data & 0x80) != 0;
        self.loop_flag = (data & 0x40) != 0;
        self.timer.set_period_direct(DMC_RATE_TABLE[(data & 0x0F) as usize]);
        if !self.irq_enable {
            self.irq_flag = false;
        }
    }

    /// $4011: 7-bit direct output level load.
    fn write_direct_load(&mut self, data: u8) {
        self.output_level = data & 0x7F;
    }

    /// $4012: sample start address, as $C000 + data * 64.
    fn write_sample_address(&mut self, data: u8) {
        self.sample_address = 0xC000u16.wrapping_add((data as u16) * 64);
    }

    /// $4013: sample length, as data * 16 + 1 bytes.
    fn write_sample_length(&mut self, data: u8) {
        self.sample_length = (data as u16) * 16 + 1;
    }

    fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.bytes_remaining = 0;
        } else if self.bytes_remaining == 0 {
            self.current_address = self.sample_address;
            self.bytes_remaining = self.sample_length;
        }
    }

    fn is_active(&self) -> bool {
        self.bytes_remaining > 0
    }

    /// Address of the next sample byte to fetch, if the buffer has run dry.
    fn pending_fetch_address(&self) -> Option<u16> {
        if self.sample_buffer.is_none() && self.bytes_remaining > 0 {
            Some(self.current_address)
        } else {
            None
        }
    }

    /// Feed a byte fetched from `pending_fetch_address()` back into the channel.
    fn provide_sample_byte(&mut self, byte: u8) {
        self.sample_buffer = Some(byte);
        self.current_address = if self.current_address == 0xFFFF {
            0x8000
        } else {
            self.current_address + 1
        };
        self.bytes_remaining -= 1;

        if self.bytes_remaining == 0 {
            if self.loop_flag {
                self.current_address = self.sample_address;
                self.bytes_remaining = self.sample_length;
            } else if self.irq_enable {
                self.irq_flag = true;
            }
        }
    }

    fn clock_timer(&mut self) {
        if !self.timer.clock() {
            return;
        }

        if !self.silence {
            if (self.shift_register & 1) != 0 {
                if self.output_level <= 125 {
                    self.output_level += 2;
                }
            } else if self.output_level >= 2 {
                self.output_level -= 2;
            }
        }
        self.shift_register >>= 1;
        self.bits_remaining -= 1;

        if self.bits_remaining == 0 {
            self.bits_remaining = 8;
            if let Some(byte) = self.sample_buffer.take() {
                self.shift_register = byte;
                self.silence = false;
            } else {
                self.silence = true;
            }
        }
    }

    fn output(&self) -> u8 {
        self.output_level
    }

    fn export(&self) -> DmcChannelState {
        DmcChannelState {
            irq_enable: self.irq_enable,
            loop_flag: self.loop_flag,
            timer: self.timer.export(),
            output_level: self.output_level,
            sample_address: self.sample_address,
            sample_length: self.sample_length,
            current_address: self.current_address,
            bytes_remaining: self.bytes_remaining,
            sample_buffer: self.sample_buffer,
            shift_register: self.shift_register,
            bits_remaining: self.bits_remaining,
            silence: self.silence,
            irq_flag: self.irq_flag,
        }
    }

    fn import(&mut self, state: &DmcChannelState) {
        self.irq_enable = state.irq_enable;
        self.loop_flag = state.loop_flag;
        self.timer.import(&state.timer);
        self.output_level = state.output_level;
        self.sample_address = state.sample_address;
        self.sample_length = state.sample_length;
        self.current_address = state.current_address;
        self.bytes_remaining = state.bytes_remaining;
        self.sample_buffer = state.sample_buffer;
        self.shift_register = state.shift_register;
        self.bits_remaining = state.bits_remaining;
        self.silence = state.silence;
        self.irq_flag = state.irq_flag;
    }
}

/// Snapshot of a [`DmcChannel`]'s state, used by save states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct DmcChannelState {
    irq_enable: bool,
    loop_flag: bool,
    timer: TimerState,
    output_level: u8,
    sample_address: u16,
    sample_length: u16,
    current_address: u16,
    bytes_remaining: u16,
    sample_buffer: Option<u8>,
    shift_register: u8,
    bits_remaining: u8,
    silence: bool,
    irq_flag: bool,
}

/// CPU cycle counts at which the 4-step frame sequencer clocks its steps.
const FRAME_SEQUENCER_4STEP: [u32; 4] = [7457, 14913, 22371, 29829];
/// CPU cycle counts at which the 5-step frame sequencer clocks its steps.
const FRAME_SEQUENCER_5STEP: [u32; 5] = [7457, 14913, 22371, 29829, 37281];

/// Snapshot of the APU's complete internal state (all five channels plus the
/// frame sequencer), used by save states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApuState {
    pulse1: PulseChannelState,
    pulse2: PulseChannelState,
    triangle: TriangleChannelState,
    noise: NoiseChannelState,
    dmc: DmcChannelState,
    cycle_parity: bool,
    sequencer_cycle: u32,
    sequencer_mode: bool,
    frame_irq_inhibit: bool,
    frame_irq_flag: bool,
    status_control: u8,
}

// ============================================================================
// APU Main Structure
// ============================================================================

/// APU structure representing the Audio Processing Unit (Ricoh 2A03) state.
///
/// All five channels (two pulse, triangle, noise, DMC) and the frame sequencer
/// are fully modeled; `clock()` advances them all by one CPU cycle.
pub struct Apu {
    pulse1: PulseChannel,
    pulse2: PulseChannel,
    triangle: TriangleChannel,
    noise: NoiseChannel,
    dmc: DmcChannel,

    /// Toggles every CPU cycle; pulse/noise/DMC timers clock on the falling half.
    cycle_parity: bool,

    /// Cycles elapsed in the current frame sequencer pass.
    sequencer_cycle: u32,
    /// 5-step mode when set (from $4017 bit 7), 4-step otherwise.
    sequencer_mode: bool,
    /// Frame IRQ inhibit flag (from $4017 bit 6).
    frame_irq_inhibit: bool,
    /// Pending frame IRQ, cleared by reading $4015 or a $4017 write with inhibit set.
    frame_irq_flag: bool,

    /// $4015 write shadow, exposed for diagnostics.
    status_control: u8,
}

impl Apu {
    /// Create a new APU instance with default (power-on) state.
    ///
    /// # Example
    ///
    /// ```
    /// use nescade::apu::Apu;
    ///
    /// let apu = Apu::new();
    /// ```
    pub fn new() -> Self {
        Apu {
            pulse1: PulseChannel::new(1),
            pulse2: PulseChannel::new(2),
            triangle: TriangleChannel::new(),
            noise: NoiseChannel::new(),
            dmc: DmcChannel::new(),
            cycle_parity: false,
            sequencer_cycle: 0,
            sequencer_mode: false,
            frame_irq_inhibit: false,
            frame_irq_flag: false,
            status_control: 0x00,
        }
    }

    /// Reset APU to power-on state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Capture the full internal state of every channel and the frame
    /// sequencer, for save states.
    pub(crate) fn export_state(&self) -> ApuState {
        ApuState {
            pulse1: self.pulse1.export(),
            pulse2: self.pulse2.export(),
            triangle: self.triangle.export(),
            noise: self.noise.export(),
            dmc: self.dmc.export(),
            cycle_parity: self.cycle_parity,
            sequencer_cycle: self.sequencer_cycle,
            sequencer_mode: self.sequencer_mode,
            frame_irq_inhibit: self.frame_irq_inhibit,
            frame_irq_flag: self.frame_irq_flag,
            status_control: self.status_control,
        }
    }

    /// Restore a previously captured state, replacing all channel and frame
    /// sequencer state.
    pub(crate) fn import_state(&mut self, state: &ApuState) {
        self.pulse1.import(&state.pulse1);
        self.pulse2.import(&state.pulse2);
        self.triangle.import(&state.triangle);
        self.noise.import(&state.noise);
        self.dmc.import(&state.dmc);
        self.cycle_parity = state.cycle_parity;
        self.sequencer_cycle = state.sequencer_cycle;
        self.sequencer_mode = state.sequencer_mode;
        self.frame_irq_inhibit = state.frame_irq_inhibit;
        self.frame_irq_flag = state.frame_irq_flag;
        self.status_control = state.status_control;
    }

    /// Advance all channel timers and the frame sequencer by one CPU cycle.
    ///
    /// If the DMC channel needs a new sample byte, call `dmc_pending_fetch_address()`
    /// beforehand and hand the fetched byte to `dmc_provide_sample()` before this call.
    pub fn clock(&mut self) {
        self.triangle.clock_timer();

        self.cycle_parity = !self.cycle_parity;
        if self.cycle_parity {
            self.pulse1.clock_timer();
            self.pulse2.clock_timer();
            self.noise.clock_timer();
            self.dmc.clock_timer();
        }

        self.clock_frame_sequencer();
    }

    fn clock_frame_sequencer(&mut self) {
        self.sequencer_cycle += 1;

        if self.sequencer_mode {
            match self.sequencer_cycle {
                c if c == FRAME_SEQUENCER_5STEP[0] => self.clock_quarter_frame(),
                c if c == FRAME_SEQUENCER_5STEP[1] => self.clock_half_frame(),
                c if c == FRAME_SEQUENCER_5STEP[2] => self.clock_quarter_frame(),
                c if c == FRAME_SEQUENCER_5STEP[3] => {}
                c if c == FRAME_SEQUENCER_5STEP[4] => {
                    self.clock_half_frame();
                    self.sequencer_cycle = 0;
                }
                _ => {}
            }
        } else {
            match self.sequencer_cycle {
                c if c == FRAME_SEQUENCER_4STEP[0] => self.clock_quarter_frame(),
                c if c == FRAME_SEQUENCER_4STEP[1] => self.clock_half_frame(),
                c if c == FRAME_SEQUENCER_4STEP[2] => self.clock_quarter_frame(),
                c if c == FRAME_SEQUENCER_4STEP[3] => {
                    self.clock_half_frame();
                    if !self.frame_irq_inhibit {
                        self.frame_irq_flag = true;
                    }
                    self.sequencer_cycle = 0;
                }
                _ => {}
            }
        }
    }

    /// Clock the frame sequencer's quarter-frame generators (envelopes, triangle linear counter).
    pub fn clock_quarter_frame(&mut self) {
        self.pulse1.clock_envelope();
        self.pulse2.clock_envelope();
        self.triangle.clock_linear_counter();
        self.noise.clock_envelope();
    }

    /// Clock the frame sequencer's half-frame generators (length counters, sweeps), plus
    /// everything `clock_quarter_frame` clocks.
    pub fn clock_half_frame(&mut self) {
        self.clock_quarter_frame();

        self.pulse1.clock_length_counter();
        self.pulse1.clock_sweep();
        self.pulse2.clock_length_counter();
        self.pulse2.clock_sweep();
        self.triangle.clock_length_counter();
        self.noise.clock_length_counter();
    }

    /// Address the DMC channel needs fetched from CPU address space, if any.
    ///
    /// The caller (the bus) is responsible for performing the actual read and
    /// feeding the result back via `dmc_provide_sample`, since the APU has no
    /// direct access to the rest of the memory map.
    pub fn dmc_pending_fetch_address(&self) -> Option<u16> {
        self.dmc.pending_fetch_address()
    }

    /// Feed a byte read from `dmc_pending_fetch_address()` into the DMC channel.
    pub fn dmc_provide_sample(&mut self, byte: u8) {
        self.dmc.provide_sample_byte(byte);
    }

    /// Whether a frame or DMC IRQ is currently asserted.
    pub fn irq_pending(&self) -> bool {
        self.frame_irq_flag || self.dmc.irq_flag
    }

    /// Get the mixed output sample from all channels (simple additive mix, 0-30 range).
    ///
    /// For the proper non-linear NES mixing curve, feed the individual channel
    /// outputs to [`crate::audio::Mixer::mix`] instead.
    pub fn output(&self) -> u8 {
        self.pulse1.output().saturating_add(self.pulse2.output())
    }

    /// Get the output from pulse channel 1 (0-15).
    pub fn pulse1_output(&self) -> u8 {
        self.pulse1.output()
    }

    /// Get the output from pulse channel 2 (0-15).
    pub fn pulse2_output(&self) -> u8 {
        self.pulse2.output()
    }

    /// Get the output from the triangle channel (0-15).
    pub fn triangle_output(&self) -> u8 {
        self.triangle.output()
    }

    /// Get the output from the noise channel (0-15).
    pub fn noise_output(&self) -> u8 {
        self.noise.output()
    }

    /// Get the output from the DMC channel (0-127).
    pub fn dmc_output(&self) -> u8 {
        self.dmc.output()
    }

    /// Read from an APU register.
    ///
    /// Every register but $4015 is write-only and reads back as open-bus zero.
    fn read_register(&mut self, addr: u16) -> u8 {
        match addr {
            0x4000..=0x4013 => 0,
            0x4014 => 0,

            // $4015: Status/Control
            // Bit 0-3: pulse1/pulse2/triangle/noise length counter > 0
            // Bit 4: DMC bytes remaining > 0
            // Bit 6: frame interrupt flag (cleared by this read)
            // Bit 7: DMC interrupt flag
            0x4015 => {
                let mut status = 0u8;
                if self.pulse1.length_counter.is_active() {
                    status |= 0x01;
                }
                if self.pulse2.length_counter.is_active() {
                    status |= 0x02;
                }
                if self.triangle.length_counter.is_active() {
                    status |= 0x04;
                }
                if self.noise.length_counter.is_active() {
                    status |= 0x08;
                }
                if self.dmc.is_active() {
                    status |= 0x10;
                }
                if self.frame_irq_flag {
                    status |= 0x40;
                }
                if self.dmc.irq_flag {
                    status |= 0x80;
                }
                self.frame_irq_flag = false;
                status
            }

            0x4016 => 0,
            0x4017 => 0,

            _ => 0,
        }
    }

    /// Write to an APU register.
    fn write_register(&mut self, addr: u16, data: u8) {
        match addr {
            // Pulse 1 ($4000-$4003)
            0x4000 => self.pulse1.write_register_0(data),
            0x4001 => self.pulse1.write_register_1(data),
            0x4002 => self.pulse1.write_register_2(data),
            0x4003 => self.pulse1.write_register_3(data),

            // Pulse 2 ($4004-$4007)
            0x4004 => self.pulse2.write_register_0(data),
            0x4005 => self.pulse2.write_register_1(data),
            0x4006 => self.pulse2.write_register_2(data),
            0x4007 => self.pulse2.write_register_3(data),

            // Triangle ($4008-$400B)
            0x4008 => self.triangle.write_register_0(data),
            0x4009 => {}
            0x400A => self.triangle.write_register_2(data),
            0x400B => self.triangle.write_register_3(data),

            // Noise ($400C-$400F)
            0x400C => self.noise.write_register_0(data),
            0x400D => {}
            0x400E => self.noise.write_register_2(data),
            0x400F => self.noise.write_register_3(data),

            // DMC ($4010-$4013)
            0x4010 => self.dmc.write_control(data),
            0x4011 => self.dmc.write_direct_load(data),
            0x4012 => self.dmc.write_sample_address(data),
            0x4013 => self.dmc.write_sample_length(data),

            // $4014: OAM DMA - not part of the APU, handled by the bus
            0x4014 => {}

            // $4015: Status/Control - enable/disable channels
            0x4015 => {
                self.status_control = data;
                self.pulse1.set_enabled((data & 0x01) != 0);
                self.pulse2.set_enabled((data & 0x02) != 0);
                self.triangle.set_enabled((data & 0x04) != 0);
                self.noise.set_enabled((data & 0x08) != 0);
                self.dmc.set_enabled((data & 0x10) != 0);
                self.dmc.irq_flag = false;
            }

            // $4016: Controller 1 - not part of the APU, handled separately
            0x4016 => {}

            // $4017: Frame Counter
            // Bit 6: IRQ inhibit flag
            // Bit 7: Sequencer mode (0 = 4-step, 1 = 5-step)
            0x4017 => {
                self.sequencer_mode = (data & 0x80) != 0;
                self.frame_irq_inhibit = (data & 0x40) != 0;
                if self.frame_irq_inhibit {
                    self.frame_irq_flag = false;
                }
                self.sequencer_cycle = 0;
                if self.sequencer_mode {
                    self.clock_half_frame();
                }
            }

            _ => {}
        }
    }
}

impl MemoryMappedDevice for Apu {
    /// Read a byte from APU registers ($4000-$4017).
    fn read(&mut self, addr: u16) -> u8 {
        self.read_register(addr)
    }

    /// Write a byte to APU registers ($4000-$4017).
    fn write(&mut self, addr: u16, data: u8) {
        self.write_register(addr, data);
    }
}

impl Default for Apu {
    fn default() -> Self {
        Self::new()
    }
}
