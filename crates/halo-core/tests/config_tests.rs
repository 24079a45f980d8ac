use halo_core::{AppConfig, MeshFormat, MeshSource, RGB_SHIFT_AMOUNT};

#[test]
fn empty_query_gives_defaults() {
    let cfg = AppConfig::from_query("");
    assert_eq!(cfg, AppConfig::default());
    assert!(cfg.post_process_enabled);
    assert!(cfg.auto_rotate);
    assert_eq!(cfg.mesh_source, MeshSource::Icosahedron);
    assert_eq!(cfg.subdivision_level.get(), 0);
    assert_eq!(cfg.rgb_shift_amount, RGB_SHIFT_AMOUNT);
}

#[test]
fn flags_level_and_amount_are_read() {
    let cfg = AppConfig::from_query("?post=0&rotate=false&level=3&amount=0.1");
    assert!(!cfg.post_process_enabled);
    assert!(!cfg.auto_rotate);
    assert_eq!(cfg.subdivision_level.get(), 3);
    assert!((cfg.rgb_shift_amount - 0.1).abs() < 1e-6);
}

#[test]
fn invalid_values_keep_defaults() {
    let cfg = AppConfig::from_query("level=9&amount=-2&post=maybe&unknown=1");
    assert_eq!(cfg, AppConfig::default());
}

#[test]
fn mesh_format_comes_from_extension_or_tag() {
    let cfg = AppConfig::from_query("mesh=models/bunny.OBJ");
    assert_eq!(
        cfg.mesh_source,
        MeshSource::ExternalFile {
            path: "models/bunny.OBJ".into(),
            format: MeshFormat::Obj,
        }
    );

    let cfg = AppConfig::from_query("mesh=part.bin&format=stl");
    assert!(matches!(
        cfg.mesh_source,
        MeshSource::ExternalFile {
            format: MeshFormat::Stl,
            ..
        }
    ));
}

#[test]
fn unknown_mesh_format_falls_back_to_icosahedron() {
    let cfg = AppConfig::from_query("mesh=scene.gltf");
    assert_eq!(cfg.mesh_source, MeshSource::Icosahedron);
    assert!("ply".parse::<MeshFormat>().is_err());
}

#[test]
fn query_values_are_percent_decoded() {
    let cfg = AppConfig::from_query("mesh=models%2Fmy%20bunny.obj&level=%32");
    assert_eq!(
        cfg.mesh_source,
        MeshSource::ExternalFile {
            path: "models/my bunny.obj".into(),
            format: MeshFormat::Obj,
        }
    );
    assert_eq!(cfg.subdivision_level.get(), 2);
}

#[test]
fn broken_percent_encoding_is_skipped() {
    let cfg = AppConfig::from_query("mesh=%FF.obj&level=1");
    assert_eq!(cfg.mesh_source, MeshSource::Icosahedron);
    assert_eq!(cfg.subdivision_level.get(), 1);
}
