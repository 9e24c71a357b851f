pub mod admin;
pub mod auth;
pub mod blog;
pub mod gallery;
pub mod guide_owner;
pub mod guides;
pub mod packages;
pub mod reviews;
pub mod schedules;
pub mod users;
pub mod videos;
pub mod vocab;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth and user profiles ──
    cfg.service(web::scope("/auth").route("/me", web::get().to(auth::me)));
    cfg.service(
        web::resource("/users/me/profile")
            .route(web::get().to(users::get_my_profile))
            .route(web::put().to(users::update_my_profile)),
    );
    cfg.route("/users/{slug}/profile", web::get().to(users::get_profile));

    // ── Blog and pages (public) ──
    cfg.service(
        web::scope("/blog")
            .route("", web::get().to(blog::list_posts))
            .route("/{slug}", web::get().to(blog::get_post)),
    );
    cfg.route("/pages/{slug}", web::get().to(blog::get_page));

    // ── Guide directory (public, except registration) ──
    // Fixed segments are registered before `/{slug}`.
    cfg.service(
        web::scope("/guides")
            .route("", web::get().to(guides::list_guides))
            .route("/available", web::get().to(guides::available_guides))
            .route("/register", web::post().to(guides::register))
            .route("/{slug}", web::get().to(guides::get_guide))
            .route("/{slug}/reviews", web::get().to(guides::list_reviews))
            .route("/{slug}/similar", web::get().to(guides::similar_guides))
            .route("/{slug}/review", web::post().to(guides::submit_review)),
    );

    // ── Guide owner area (authenticated guide) ──
    cfg.service(
        web::scope("/guide")
            .service(
                web::resource("/profile")
                    .route(web::get().to(guide_owner::get_profile))
                    .route(web::put().to(guide_owner::update_profile)),
            )
            .route("/dashboard", web::get().to(guide_owner::dashboard))
            .service(
                web::resource("/packages")
                    .route(web::get().to(packages::list_packages))
                    .route(web::post().to(packages::create_package)),
            )
            .service(
                web::resource("/packages/{slug}")
                    .route(web::get().to(packages::get_package))
                    .route(web::put().to(packages::update_package))
                    .route(web::delete().to(packages::delete_package)),
            )
            .service(
                web::resource("/gallery")
                    .route(web::get().to(gallery::list_gallery))
                    .route(web::post().to(gallery::add_image)),
            )
            .service(
                web::resource("/gallery/{id}")
                    .route(web::put().to(gallery::update_image))
                    .route(web::delete().to(gallery::delete_image)),
            )
            .service(
                web::resource("/videos")
                    .route(web::get().to(videos::list_videos))
                    .route(web::post().to(videos::add_video)),
            )
            .service(
                web::resource("/videos/{id}")
                    .route(web::put().to(videos::update_video))
                    .route(web::delete().to(videos::delete_video)),
            )
            .service(
                web::resource("/schedules")
                    .route(web::get().to(schedules::list_schedules))
                    .route(web::post().to(schedules::create_schedule)),
            )
            .service(
                web::resource("/schedules/{id}")
                    .route(web::put().to(schedules::update_schedule))
                    .route(web::delete().to(schedules::delete_schedule)),
            )
            .route("/reviews/{id}/approval", web::post().to(reviews::set_approval)),
    );

    // ── Vocabularies ──
    cfg.route("/locations", web::get().to(vocab::list_locations));
    cfg.service(
        web::scope("/specialties")
            .route("", web::get().to(vocab::list_specialties))
            .route("/add", web::post().to(vocab::add_specialty)),
    );
    cfg.service(
        web::scope("/languages")
            .route("", web::get().to(vocab::list_languages))
            .route("/add", web::post().to(vocab::add_language)),
    );
    cfg.service(
        web::scope("/certifications")
            .route("", web::get().to(vocab::list_certifications))
            .route("/add", web::post().to(vocab::add_certification)),
    );

    // ── Admin ──
    cfg.service(
        web::scope("/admin")
            .route("/categories", web::post().to(admin::create_category))
            .route("/authors", web::post().to(admin::create_author))
            .route("/posts", web::post().to(admin::create_post))
            .route("/posts/{slug}/publish", web::post().to(admin::publish_post))
            .route("/pages", web::post().to(admin::create_page))
            .route("/locations", web::post().to(admin::create_location))
            .service(
                web::resource("/badges")
                    .route(web::get().to(admin::list_badges))
                    .route(web::post().to(admin::create_badge)),
            )
            .route("/guides/{slug}/badges", web::post().to(admin::assign_badge))
            .route(
                "/guides/{slug}/badges/{badge_id}",
                web::delete().to(admin::revoke_badge),
            )
            .route("/guides/{slug}/flags", web::put().to(admin::update_guide_flags)),
    );
}
