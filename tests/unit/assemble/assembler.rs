use std::path::Path;

use super::*;
use crate::assemble::overlays::OverlayAsset;
use crate::metadata::loader::{SourceRows, build_collections, read_rows};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "cardstamp_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &Path, w: u32, h: u32, px: [u8; 4]) {
    save_png(path, &RgbaImage::from_pixel(w, h, image::Rgba(px))).unwrap();
}

fn write_overlays(assets: &Path, frame: &str) {
    let dir = assets.join(frame);
    write_png(&dir.join("borders/black.png"), 2, 2, [0, 0, 0, 255]);
    write_png(&dir.join("collection/set_name.png"), 1, 1, [9, 9, 9, 255]);
    write_png(&dir.join("years/2023.png"), 1, 1, [20, 23, 0, 255]);
    for rarity in ["rare", "token", "land"] {
        write_png(&dir.join(format!("rarities/{rarity}.png")), 1, 1, [1, 2, 3, 255]);
    }
    for d in 0..10u8 {
        write_png(&dir.join(format!("numbers/{d}.png")), 1, 1, [d, d, d, 255]);
    }
}

fn config_in(root: &Path) -> StampConfig {
    StampConfig::default().rebased(root)
}

fn collections(cards: &str, lands: &str) -> Collections {
    let rows = SourceRows {
        cards: read_rows(cards.as_bytes()).unwrap(),
        basic_lands: read_rows(lands.as_bytes()).unwrap(),
        ..SourceRows::default()
    };
    build_collections(&rows).unwrap()
}

const CARDS: &str = "\
Card Name,Rarity,Color Identity,Type(s),Date Created,Archetype,Updated
He's Here,Rare,B,Creature,03/15/2023,Aggro,TRUE
Early Bird,Rare,W,Creature,01/15/2023,Aggro,FALSE
";

const LANDS: &str = "\
Card Name,Descriptor,Date Created
Island,Ocean,02/02/2023
";

#[test]
fn cards_and_lands_share_one_range() {
    let c = collections(CARDS, LANDS);
    assert_eq!(numbering_range(&c, Category::Cards), (1, 3));
    assert_eq!(numbering_range(&c, Category::BasicLands), (3, 3));
    assert_eq!(numbering_range(&c, Category::Tokens), (1, 0));
}

#[test]
fn stack_puts_artwork_under_overlays() {
    let tmp = temp_dir("assembler_stack");
    write_overlays(&tmp.join("images"), "standard");
    let config = config_in(&tmp);
    let options = RunOptions::default();
    let c = collections(CARDS, LANDS);
    let card = &c.cards["He's Here"];

    let mut assembler = Assembler::new(&config, &options);
    let job = StampJob::front(Category::Cards, card, 2, 3);
    let artwork = RgbaImage::from_pixel(3, 3, image::Rgba([200, 0, 0, 255]));
    let stack = assembler.build_stack(&job, artwork.clone()).unwrap();

    // artwork, border, set icon, year, rarity, one digit
    assert_eq!(stack.len(), 6);
    assert_eq!(stack.layers()[0].image, artwork);
    assert_eq!(stack.canvas(), crate::foundation::core::Canvas::new(1500, 2100));
    assert_eq!(assembler.store().cached_overlays(), 5);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_artwork_is_skipped_without_output() {
    let tmp = temp_dir("assembler_missing_art");
    write_overlays(&tmp.join("images"), "standard");
    let config = config_in(&tmp);
    let options = RunOptions::default();
    let c = collections(CARDS, LANDS);

    let mut assembler = Assembler::new(&config, &options);
    let job = StampJob::front(Category::Cards, &c.cards["He's Here"], 2, 3);
    assert_eq!(assembler.stamp(&job), ItemOutcome::MissingArtwork);
    assert!(!config.results_dir.join("He's Here.png").exists());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_overlay_skips_only_that_item() {
    let tmp = temp_dir("assembler_missing_overlay");
    write_overlays(&tmp.join("images"), "standard");
    std::fs::remove_file(tmp.join("images/standard/rarities/rare.png")).unwrap();
    let config = config_in(&tmp);
    write_png(&config.artwork_dir.join("He's Here.png"), 2, 2, [5, 5, 5, 255]);
    write_png(&config.artwork_dir.join("Island - Ocean.png"), 2, 2, [6, 6, 6, 255]);
    let options = RunOptions::default();
    let c = collections(CARDS, LANDS);

    let mut assembler = Assembler::new(&config, &options);
    let stats = assembler.run(&c);
    assert_eq!(stats.missing_overlays, vec!["He's Here".to_string()]);
    assert_eq!(stats.missing_artwork, vec!["Early Bird".to_string()]);
    assert_eq!(stats.processed, 1);
    assert!(config.results_dir.join("Island - Ocean.png").is_file());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn corrupt_images_skip_only_that_item() {
    let tmp = temp_dir("assembler_corrupt");
    write_overlays(&tmp.join("images"), "standard");
    let config = config_in(&tmp);
    std::fs::create_dir_all(&config.artwork_dir).unwrap();
    std::fs::write(config.artwork_dir.join("Early Bird.png"), b"not a png").unwrap();
    write_png(&config.artwork_dir.join("He's Here.png"), 2, 2, [5, 5, 5, 255]);
    std::fs::write(tmp.join("images/standard/rarities/land.png"), b"not a png").unwrap();
    write_png(&config.artwork_dir.join("Island - Ocean.png"), 2, 2, [6, 6, 6, 255]);
    let options = RunOptions::default();
    let c = collections(CARDS, LANDS);

    let stats = Assembler::new(&config, &options).run(&c);
    assert_eq!(
        stats.unreadable,
        vec!["Early Bird".to_string(), "Island - Ocean".to_string()]
    );
    assert_eq!(stats.processed, 1);
    assert!(config.results_dir.join("He's Here.png").is_file());
    assert!(!config.results_dir.join("Early Bird.png").exists());

    let job = StampJob::front(Category::Cards, &c.cards["Early Bird"], 1, 3);
    let ItemOutcome::Unreadable(reason) = Assembler::new(&config, &options).stamp(&job) else {
        panic!("corrupt artwork should be unreadable");
    };
    assert!(reason.contains("Early Bird.png"), "{reason}");
    assert!(reason.contains(':'), "decode cause should follow the path: {reason}");

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn unwritable_output_is_skipped() {
    let tmp = temp_dir("assembler_unwritable");
    write_overlays(&tmp.join("images"), "standard");
    let config = config_in(&tmp);
    write_png(&config.artwork_dir.join("He's Here.png"), 2, 2, [5, 5, 5, 255]);
    write_png(&config.artwork_dir.join("Early Bird.png"), 2, 2, [5, 5, 5, 255]);
    // A directory squatting on the output path makes the write fail.
    std::fs::create_dir_all(config.results_dir.join("Early Bird.png")).unwrap();
    let options = RunOptions::default();
    let c = collections(CARDS, LANDS);

    let stats = Assembler::new(&config, &options).run(&c);
    assert_eq!(stats.unreadable, vec!["Early Bird".to_string()]);
    assert!(config.results_dir.join("He's Here.png").is_file());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn only_updated_and_name_filters_keep_numbering() {
    let tmp = temp_dir("assembler_filters");
    write_overlays(&tmp.join("images"), "standard");
    let config = config_in(&tmp);
    write_png(&config.artwork_dir.join("He's Here.png"), 2, 2, [5, 5, 5, 255]);
    write_png(&config.artwork_dir.join("Early Bird.png"), 2, 2, [5, 5, 5, 255]);
    let options = RunOptions {
        only_updated: true,
        basic_lands: false,
        quarantine: true,
        ..RunOptions::default()
    };
    let c = collections(CARDS, LANDS);

    let mut assembler = Assembler::new(&config, &options);
    let stats = assembler.run(&c);
    assert_eq!(stats.processed, 1);
    assert_eq!(
        stats.written,
        vec![config.results_dir.join("quarantine").join("He's Here.png")]
    );
    // Early Bird is filtered out but still holds number 1.
    let job = StampJob::front(Category::Cards, &c.cards["He's Here"], 2, 3);
    let plan = assembler.plan(&job);
    assert_eq!(
        plan.layers.last().map(|l| &l.asset),
        Some(&OverlayAsset::Digit('2'))
    );

    let named = RunOptions {
        only_names: vec!["Early Bird".to_string()],
        tokens: false,
        basic_lands: false,
        alt_arts: false,
        ..RunOptions::default()
    };
    let stats = Assembler::new(&config, &named).run(&c);
    assert_eq!(stats.processed, 1);
    assert_eq!(stats.written, vec![config.results_dir.join("Early Bird.png")]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn banners_name_the_category() {
    assert_eq!(banner(Category::Cards, false), "----- PROCESSING CARDS -----");
    assert_eq!(banner(Category::Cards, true), "----- PROCESSING UPDATED CARDS -----");
    assert_eq!(banner(Category::BasicLands, false), "----- PROCESSING BASIC LANDS -----");
}
