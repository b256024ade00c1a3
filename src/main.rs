use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use handtracking::app::HandtrackingApp;
use handtracking::hand_landmarks::model_mediapipe::MediapipeHandLandmarksModel;
use handtracking::hand_landmarks::HandLandmarksModel;
use handtracking::store::GestureStore;
use handtracking::utils::{HandObservation, SharedState, State};
use handtracking::{
    classify_pose, control, finger_count, hand_metrics, overlay, recognize_action, webcam, Result,
};

/// Runtime configuration, read once from the environment at startup.
struct Config {
    camera_index: u32,
    model_path: String,
    db_path: String,
    font_path: String,
}

impl Config {
    fn from_env() -> Self {
        Self {
            camera_index: std::env::var("HANDTRACK_CAMERA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            model_path: std::env::var("HANDTRACK_MODEL")
                .unwrap_or_else(|_| "models/hand_landmarks_detector.onnx".to_string()),
            db_path: std::env::var("HANDTRACK_DB")
                .unwrap_or_else(|_| "gestures.sqlite".to_string()),
            font_path: std::env::var("HANDTRACK_FONT")
                .unwrap_or_else(|_| "assets/DejaVuSans.ttf".to_string()),
        }
    }
}

// the capture worker: one synchronous capture -> detect -> classify ->
// persist loop, one frame at a time, publishing into the shared state
fn worker_thread(shared_state: SharedState, config: Config) -> Result<()> {
    let devices = webcam::list_devices()?;
    shared_state.lock().unwrap().devices = Some(devices);
    shared_state.lock().unwrap().current_device = Some(config.camera_index);

    // model session and database connection live for the whole worker and
    // are released when it returns
    let model = MediapipeHandLandmarksModel::from_file(&config.model_path)?;
    let store = GestureStore::open(&config.db_path)?;
    log::info!("logging gestures to {}", config.db_path);

    while shared_state.lock().unwrap().running {
        let device_index = shared_state
            .lock()
            .unwrap()
            .current_device
            .unwrap_or(config.camera_index);

        let mut camera = webcam::open_camera(device_index)?;
        let resolution = camera.resolution();
        shared_state.lock().unwrap().resolution =
            Some((resolution.width_x, resolution.height_y));
        shared_state.lock().unwrap().last_frame_time = Some(SystemTime::now());

        loop {
            if !shared_state.lock().unwrap().running {
                break;
            }
            // the gui may have picked another camera
            if shared_state.lock().unwrap().current_device != Some(device_index) {
                log::info!("camera changed, reopening stream");
                break;
            }

            let image = match webcam::grab_frame(&mut camera) {
                Ok(image) => image,
                Err(err) => {
                    log::warn!("dropping frame: {}", err);
                    std::thread::sleep(std::time::Duration::from_millis(100));
                    continue;
                }
            };

            let hands = match model.run(&image) {
                Ok(hands) => hands,
                Err(err) => {
                    log::warn!("landmark detection failed, skipping frame: {}", err);
                    continue;
                }
            };

            let logging_enabled = shared_state.lock().unwrap().logging_enabled;
            let mut observations = Vec::with_capacity(hands.len());

            for sample in &hands {
                let metrics = hand_metrics(sample);
                let count = finger_count(sample);
                let pose = classify_pose(sample);
                let action = recognize_action(pose);

                log::debug!(
                    "hand size {:.1}, fingers [{}], pose {}, count {}, action {}",
                    metrics.hand_size,
                    metrics.finger_lengths_text(),
                    pose,
                    count,
                    action
                );

                if logging_enabled {
                    store.insert_metrics(&metrics, pose)?;
                    store.insert_action(action, count)?;
                }

                observations.push(HandObservation {
                    metrics,
                    finger_count: count,
                    pose,
                    action,
                });
            }

            // frame-rate bookkeeping: only the previous-frame timestamp and
            // the smoothing buffer carry across frames
            let now = SystemTime::now();
            let last = shared_state
                .lock()
                .unwrap()
                .last_frame_time
                .unwrap_or(now);
            let frame_delta = now
                .duration_since(last)
                .unwrap_or_default()
                .as_secs_f32();
            let fps = if frame_delta > 0.0 {
                1.0 / frame_delta
            } else {
                0.0
            };
            let millis = now
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis();

            let mut state = shared_state.lock().unwrap();
            state.fps_ts.push(fps, millis);
            state.fps = Some(state.fps_ts.get_mean().round());
            state.last_frame_time = Some(now);
            state.image = Some(image);
            state.hands = hands;
            state.observations = observations;
        }

        let _ = camera.stop_stream();
    }

    log::info!("capture worker stopped");
    Ok(())
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = Config::from_env();
    let font = overlay::load_font(&config.font_path);

    let shared_state: SharedState = Arc::new(Mutex::new(State::default()));

    let worker_state = Arc::clone(&shared_state);
    let worker = std::thread::spawn(move || {
        if let Err(err) = worker_thread(worker_state, config) {
            log::error!("capture worker failed: {}", err);
        }
    });

    let control_state = Arc::clone(&shared_state);
    std::thread::spawn(move || {
        if let Err(err) = control::serve(control_state) {
            log::error!("control socket failed: {}", err);
        }
    });

    let gui_state = Arc::clone(&shared_state);
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Hand Tracking",
        native_options,
        Box::new(move |cc| Box::new(HandtrackingApp::new(cc, gui_state, font))),
    )?;

    // gui is gone: tell the worker to drain out and wait for it
    shared_state.lock().unwrap().running = false;
    let _ = worker.join();

    Ok(())
}
