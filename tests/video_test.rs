use totrip_backend::models::videos::{CreateVideo, VideoResponse, Model as Video};
use totrip_backend::youtube::{VideoLinks, video_id};
use uuid::Uuid;
use validator::Validate;

const ID: &str = "dQw4w9WgXcQ";

#[test]
fn extracts_id_from_common_shapes() {
    for url in [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
        "https://youtu.be/dQw4w9WgXcQ",
        "https://www.youtube.com/embed/dQw4w9WgXcQ",
        "https://www.youtube.com/v/dQw4w9WgXcQ",
    ] {
        assert_eq!(video_id(url), Some(ID), "{url}");
    }
}

#[test]
fn rejects_other_hosts() {
    assert_eq!(video_id("https://vimeo.com/123456789"), None);
    assert_eq!(video_id("https://youtu.be/short"), None);
    assert_eq!(video_id("not a url"), None);
}

#[test]
fn derived_links() {
    let links = VideoLinks::from_url("https://youtu.be/dQw4w9WgXcQ").expect("valid url");
    assert_eq!(links.youtube_id, ID);
    assert_eq!(links.embed_url, "https://www.youtube.com/embed/dQw4w9WgXcQ");
    assert_eq!(
        links.thumbnail_url,
        "https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg"
    );
}

#[test]
fn create_requires_youtube_url() {
    let mut input = CreateVideo {
        title: "Old town at night".to_string(),
        youtube_url: "https://vimeo.com/1".to_string(),
        description: String::new(),
        sort_order: 0,
    };
    let errors = input.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("youtube_url"));

    input.youtube_url = format!("https://www.youtube.com/watch?v={ID}");
    assert!(input.validate().is_ok());
}

#[test]
fn response_without_valid_id_has_no_links() {
    let stored = |url: &str| Video {
        id: Uuid::new_v4(),
        guide_id: Uuid::new_v4(),
        title: "Tour".to_string(),
        youtube_url: url.to_string(),
        description: String::new(),
        sort_order: 0,
        created_at: chrono::Utc::now(),
    };

    let ok = VideoResponse::from(stored("https://youtu.be/dQw4w9WgXcQ"));
    assert_eq!(ok.youtube_id.as_deref(), Some(ID));

    let broken = VideoResponse::from(stored("https://example.com/video"));
    assert!(broken.youtube_id.is_none());
    assert!(broken.embed_url.is_none());
    assert!(broken.thumbnail_url.is_none());
}
