use bevy_ecs::prelude::*;
use log::error;
use raylib::prelude::*;

use crate::resources::characterasset::CharacterAsset;
use crate::resources::charactermodel::CharacterModel;
use crate::resources::debugmode::DebugMode;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;
use crate::resources::viewport::Viewport3D;
use crate::resources::windowsize::WindowSize;
use crate::systems::compositor::{
    DebugInfo, DrawItem, background_source, character_placement, collect_draw_list,
};

/// Render one frame: the character into the 3D viewport, the 2D composite
/// into the fixed-resolution target, then the target letterboxed to the
/// window.
///
/// Exclusive over the `World`: the raylib handle and both render textures
/// are taken out for the duration of the frame and put back afterwards.
pub fn render_frame(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        error!("render_frame: RaylibHandle missing");
        return;
    };
    let Some(mut target) = world.remove_non_send_resource::<RenderTarget>() else {
        error!("render_frame: RenderTarget missing");
        world.insert_non_send_resource(rl);
        return;
    };
    let Some(mut viewport) = world.remove_non_send_resource::<Viewport3D>() else {
        error!("render_frame: Viewport3D missing");
        world.insert_non_send_resource(target);
        world.insert_non_send_resource(rl);
        return;
    };

    // Snapshot everything that needs a query before borrowing the world.
    let draw_list = collect_draw_list(world);
    let placement = character_placement(world);
    let debug_info = world
        .contains_resource::<DebugMode>()
        .then(|| DebugInfo::collect(world));
    let screen = *world.resource::<ScreenSize>();
    let window = *world.resource::<WindowSize>();
    let ready = world
        .get_resource::<CharacterAsset>()
        .is_some_and(|a| a.is_ready());

    {
        let th = world.non_send_resource::<RaylibThread>();
        let model = world.get_non_send_resource::<CharacterModel>();

        // 3D: the character, on a transparent background.
        {
            let camera = viewport.camera;
            let mut d = rl.begin_texture_mode(th, &mut viewport.target.texture);
            d.clear_background(Color::BLANK);
            if let (true, Some(model), Some(p)) = (ready, model.and_then(|m| m.model()), placement)
            {
                let mut d3 = d.begin_mode3D(camera);
                d3.draw_model_ex(
                    model,
                    Vector3::new(0.0, p.height, p.depth),
                    Vector3::new(0.0, 1.0, 0.0),
                    p.yaw,
                    Vector3::new(1.0, 1.0, 1.0),
                    Color::WHITE,
                );
            }
        }

        // 2D composite in painter's order.
        {
            let textures = world.resource::<TextureStore>();
            let surface = Rectangle::new(0.0, 0.0, screen.w as f32, screen.h as f32);
            let mut d = rl.begin_texture_mode(th, &mut target.texture);
            d.clear_background(Color::BLACK);
            for (_, item) in draw_list.iter() {
                match item {
                    DrawItem::Layer { tex_key, offset } => {
                        if let Some(tex) = textures.get(tex_key) {
                            let src = background_source(
                                tex.height as f32,
                                *offset,
                                surface.width,
                                surface.height,
                            );
                            d.draw_texture_pro(tex, src, surface, Vector2::zero(), 0.0, Color::WHITE);
                        }
                    }
                    DrawItem::Viewport { pos } => {
                        let dest = Rectangle::new(
                            pos.x,
                            pos.y,
                            viewport.target.game_width as f32,
                            viewport.target.game_height as f32,
                        );
                        d.draw_texture_pro(
                            viewport.target.texture.texture(),
                            viewport.target.source_rect(),
                            dest,
                            Vector2::zero(),
                            0.0,
                            Color::WHITE,
                        );
                    }
                }
            }
        }

        // Present, scaled to the window with letterboxing.
        {
            let dest = window.calculate_letterbox(target.game_width, target.game_height);
            let mut d = rl.begin_drawing(th);
            d.clear_background(Color::BLACK);
            d.draw_texture_pro(
                target.texture.texture(),
                target.source_rect(),
                dest,
                Vector2::zero(),
                0.0,
                Color::WHITE,
            );
            if let Some(info) = debug_info.as_ref() {
                render_debug_ui(&mut d, info);
            }
        }
    }

    world.insert_non_send_resource(viewport);
    world.insert_non_send_resource(target);
    world.insert_non_send_resource(rl);
}

/// Draw the debug overlay in window coordinates.
pub fn render_debug_ui(d: &mut RaylibDrawHandle, info: &DebugInfo) {
    let fps = d.get_fps();
    for (i, line) in info.lines(fps).iter().enumerate() {
        d.draw_text(line, 10, 10 + 20 * i as i32, 10, Color::YELLOW);
    }
}
