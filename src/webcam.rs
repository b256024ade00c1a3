// thin wrapper around nokhwa
use image::DynamicImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use nokhwa::{native_api_backend, query, Camera};

use crate::error::{Error, Result};

pub const DEFAULT_RESOLUTION: (u32, u32) = (1280, 720);
pub const DEFAULT_FPS: u32 = 30;

/// Human-readable names of the available capture devices, in backend order.
pub fn list_devices() -> Result<Vec<String>> {
    let backend = native_api_backend().ok_or(Error::NoBackend)?;
    let devices = query(backend)?;
    log::info!("there are {} available cameras", devices.len());
    Ok(devices.iter().map(|d| d.human_name()).collect())
}

/// Opens the camera at `index` and starts its stream, asking for the format
/// closest to 1280x720 NV12 at 30 fps.
pub fn open_camera(index: u32) -> Result<Camera> {
    let resolution = Resolution::new(DEFAULT_RESOLUTION.0, DEFAULT_RESOLUTION.1);
    let camera_format = CameraFormat::new(resolution, FrameFormat::NV12, DEFAULT_FPS);
    let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(camera_format));

    log::info!("opening camera {} with format {:?}", index, requested);

    let mut camera = Camera::new(CameraIndex::Index(index), requested)?;
    camera.open_stream()?;

    let actual = camera.resolution();
    log::info!(
        "camera {} streaming at {}x{} ({:?})",
        index,
        actual.width_x,
        actual.height_y,
        camera.frame_format()
    );

    Ok(camera)
}

/// Polls one frame and decodes it to RGB. The image is mirrored so the
/// display behaves like a mirror.
pub fn grab_frame(camera: &mut Camera) -> Result<DynamicImage> {
    let buffer = camera.frame()?;
    let decoded = buffer.decode_image::<RgbFormat>()?;
    Ok(DynamicImage::ImageRgb8(decoded).fliph())
}
