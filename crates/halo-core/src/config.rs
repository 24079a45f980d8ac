//! Runtime configuration passed to the 3D view at construction.

use crate::constants::RGB_SHIFT_AMOUNT;
use crate::error::{HaloError, Result};
use crate::subdivision::SubdivisionLevel;
use std::str::FromStr;

/// File formats understood by the mesh provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshFormat {
    Stl,
    Obj,
}

impl MeshFormat {
    /// Guess the format from a path's extension.
    pub fn from_path(path: &str) -> Result<Self> {
        let ext = path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        ext.parse()
    }
}

impl FromStr for MeshFormat {
    type Err = HaloError;
    fn from_str(tag: &str) -> Result<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "stl" => Ok(MeshFormat::Stl),
            "obj" => Ok(MeshFormat::Obj),
            _ => Err(HaloError::UnsupportedFormat(tag.to_string())),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum MeshSource {
    #[default]
    Icosahedron,
    ExternalFile { path: String, format: MeshFormat },
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Route the scene through the offscreen target and colour-fringe pass.
    pub post_process_enabled: bool,
    pub mesh_source: MeshSource,
    /// Initial slider position.
    pub subdivision_level: SubdivisionLevel,
    pub auto_rotate: bool,
    pub rgb_shift_amount: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            post_process_enabled: true,
            mesh_source: MeshSource::Icosahedron,
            subdivision_level: SubdivisionLevel::default(),
            auto_rotate: true,
            rgb_shift_amount: RGB_SHIFT_AMOUNT,
        }
    }
}

impl AppConfig {
    /// Build a config from a URL query such as `?post=0&mesh=models/bunny.obj&level=2`.
    ///
    /// Recognized keys: `post`, `mesh`, `format`, `level`, `rotate`, `amount`.
    /// Keys and values are percent-decoded first.
    /// Unknown keys are ignored and invalid values keep their defaults.
    pub fn from_query(query: &str) -> Self {
        let mut cfg = AppConfig::default();
        let mut mesh_path: Option<String> = None;
        let mut format_tag: Option<String> = None;

        for pair in query.trim_start_matches('?').split('&') {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let (key, value) = match (urlencoding::decode(raw_key), urlencoding::decode(raw_value)) {
                (Ok(k), Ok(v)) => (k, v),
                _ => {
                    log::warn!("[config] `{pair}` is not valid percent-encoding");
                    continue;
                }
            };
            let (key, value) = (&*key, &*value);
            match key {
                "post" => set_flag(&mut cfg.post_process_enabled, key, value),
                "rotate" => set_flag(&mut cfg.auto_rotate, key, value),
                "mesh" if !value.is_empty() => mesh_path = Some(value.to_string()),
                "format" if !value.is_empty() => format_tag = Some(value.to_string()),
                "level" => match value.parse::<i64>().map_err(|_| value.to_string()) {
                    Ok(raw) => match SubdivisionLevel::new(raw) {
                        Ok(level) => cfg.subdivision_level = level,
                        Err(e) => log::warn!("[config] {e}"),
                    },
                    Err(v) => log::warn!("[config] level `{v}` is not an integer"),
                },
                "amount" => match value.parse::<f32>() {
                    Ok(a) if a.is_finite() && a >= 0.0 => cfg.rgb_shift_amount = a,
                    _ => log::warn!("[config] amount `{value}` ignored"),
                },
                _ => {}
            }
        }

        if let Some(path) = mesh_path {
            let format = match &format_tag {
                Some(tag) => tag.parse(),
                None => MeshFormat::from_path(&path),
            };
            match format {
                Ok(format) => cfg.mesh_source = MeshSource::ExternalFile { path, format },
                Err(e) => log::warn!("[config] {e}; showing icosahedron"),
            }
        }
        cfg
    }
}

fn set_flag(flag: &mut bool, key: &str, value: &str) {
    match value {
        "1" | "true" | "on" | "" => *flag = true,
        "0" | "false" | "off" => *flag = false,
        _ => log::warn!("[config] {key}=`{value}` is not a boolean"),
    }
}
