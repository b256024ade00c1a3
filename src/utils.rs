use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use image::DynamicImage;

use crate::action::ActionLabel;
use crate::hand::HandSample;
use crate::metrics::HandMetrics;
use crate::pose::PoseLabel;

// make SharedState an alias for a Mutex protected struct State
pub type SharedState = Arc<Mutex<State>>;

/// Classification results for one detected hand in the current frame.
#[derive(Debug, Clone)]
pub struct HandObservation {
    pub metrics: HandMetrics,
    pub finger_count: u8,
    pub pose: PoseLabel,
    pub action: ActionLabel,
}

// the data shared between the capture worker, the control server and the gui
pub struct State {
    pub fps: Option<f32>,
    pub fps_ts: TimeSeries,
    pub last_frame_time: Option<SystemTime>,
    pub resolution: Option<(u32, u32)>,
    pub image: Option<DynamicImage>,
    pub devices: Option<Vec<String>>,
    pub current_device: Option<u32>,

    pub hands: Vec<HandSample>,
    pub observations: Vec<HandObservation>,

    // flipped by the gui or the control socket; the worker reads it per hand
    pub logging_enabled: bool,
    // cleared when the gui exits so the worker can drain out
    pub running: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            fps: None,
            fps_ts: TimeSeries::new(10),
            last_frame_time: None,
            resolution: None,
            image: None,
            devices: None,
            current_device: None,

            hands: Vec::new(),
            observations: Vec::new(),

            logging_enabled: true,
            running: true,
        }
    }
}

/// Fixed-capacity time series, used to smooth the frame-rate readout.
#[derive(Clone)]
pub struct TimeSeries {
    data: VecDeque<f32>,
    timestamp: VecDeque<u128>,
    max_length: usize,
}

impl TimeSeries {
    pub fn new(max_length: usize) -> Self {
        Self {
            data: VecDeque::new(),
            timestamp: VecDeque::new(),
            max_length,
        }
    }

    pub fn push(&mut self, value: f32, timestamp: u128) {
        self.data.push_back(value);
        self.timestamp.push_back(timestamp);

        if self.data.len() > self.max_length {
            self.data.pop_front();
            self.timestamp.pop_front();
        }
    }

    pub fn get_mean(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f32>() / self.data.len() as f32
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
