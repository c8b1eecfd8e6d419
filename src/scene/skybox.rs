use snafu::{ResultExt, Snafu, ensure};
use std::path::{Path, PathBuf};

/// Face order of a cubemap, matching the +x, -x, +y, -y, +z, -z convention
/// renderers expect.
pub const CUBE_FACE_COUNT: usize = 6;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)))]
pub enum SkyboxError {
    #[snafu(display("Could not decode skybox face {path:?}: {source}"))]
    FaceUnreadable {
        path: PathBuf,
        source: image::ImageError,
    },

    #[snafu(display("Skybox face {path:?} is {width}x{height}, faces must be square"))]
    FaceNotSquare {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    #[snafu(display("Skybox face {path:?} is {size} px, other faces are {expected} px"))]
    FaceSizeMismatch {
        path: PathBuf,
        size: u32,
        expected: u32,
    },
}

/// One decoded cube face as tightly packed RGBA8.
#[derive(Debug)]
pub struct CubemapFace {
    pub size: u32,
    pub rgba: Vec<u8>,
}

/// Skybox configuration: six face image paths. The background texture doubles
/// as the environment light, so renderers get both from here.
#[derive(Debug, Clone)]
pub struct Skybox {
    pub faces: [PathBuf; CUBE_FACE_COUNT],
}

impl Skybox {
    pub fn from_faces(faces: [PathBuf; CUBE_FACE_COUNT]) -> Self {
        Skybox { faces }
    }

    /// Convention helper: looks for `posx/negx/posy/negy/posz/negz` with the
    /// given extension inside `dir`.
    pub fn from_dir<P: AsRef<Path>>(dir: P, extension: &str) -> Self {
        let dir = dir.as_ref();
        let face = |name: &str| dir.join(format!("{name}.{extension}"));
        Skybox {
            faces: [
                face("posx"),
                face("negx"),
                face("posy"),
                face("negy"),
                face("posz"),
                face("negz"),
            ],
        }
    }

    /// Decodes all six faces. Faces must be square and uniformly sized.
    pub fn load(&self) -> Result<[CubemapFace; CUBE_FACE_COUNT], SkyboxError> {
        let mut expected = None;
        let mut faces = Vec::with_capacity(CUBE_FACE_COUNT);

        for path in &self.faces {
            let img = image::open(path)
                .context(FaceUnreadableErr { path: path.clone() })?
                .to_rgba8();
            let (width, height) = img.dimensions();
            ensure!(
                width == height,
                FaceNotSquareErr {
                    path: path.clone(),
                    width,
                    height
                }
            );
            let expected = *expected.get_or_insert(width);
            ensure!(
                width == expected,
                FaceSizeMismatchErr {
                    path: path.clone(),
                    size: width,
                    expected
                }
            );

            faces.push(CubemapFace {
                size: width,
                rgba: img.into_raw(),
            });
        }

        let faces: [CubemapFace; CUBE_FACE_COUNT] = match faces.try_into() {
            Ok(faces) => faces,
            Err(_) => unreachable!("six paths decode to six faces"),
        };

        Ok(faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_convention_orders_faces() {
        let skybox = Skybox::from_dir("assets/skybox", "jpg");
        assert_eq!(skybox.faces[0], PathBuf::from("assets/skybox/posx.jpg"));
        assert_eq!(skybox.faces[5], PathBuf::from("assets/skybox/negz.jpg"));
    }

    #[test]
    fn missing_face_reports_path() {
        let skybox = Skybox::from_dir("does/not/exist", "jpg");
        let err = skybox.load().unwrap_err();
        assert!(matches!(err, SkyboxError::FaceUnreadable { .. }));
    }
}
