use matviz::scene::Scene;

fn main() {
    env_logger::init();

    // Optional scene file; the built-in default is the unit square with a
    // single 45 degree rotation.
    let scene = match std::env::args().nth(1) {
        Some(path) => {
            let json_text = std::fs::read_to_string(&path).expect("failed to read scene file");
            let desc =
                matviz::desc::parse_scene_json(&json_text).expect("failed to parse scene JSON");
            log::info!("loaded {} transforms from {path}", desc.transforms.len());
            Scene::from_desc(&desc)
        }
        None => Scene::default(),
    };

    #[cfg(all(feature = "ui", not(feature = "cli_only")))]
    {
        matviz::ui::run(scene, "matviz").expect("failed to open window");
    }

    #[cfg(not(all(feature = "ui", not(feature = "cli_only"))))]
    {
        use matviz::raster::RasterSurface;

        // Headless builds write one snapshot instead of opening a window.
        let mut raster = RasterSurface::new(1200, 800);
        matviz::surface::render(&mut raster, &scene);

        #[cfg(feature = "im-io")]
        {
            raster.save_png("matviz.png").expect("failed to write matviz.png");
            log::info!("wrote matviz.png");
        }
        #[cfg(not(feature = "im-io"))]
        log::warn!(
            "built without im-io; {}x{} snapshot discarded",
            raster.w,
            raster.h
        );
    }
}
