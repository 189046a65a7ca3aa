//! DOM rendering for the advent grid
//!
//! Cards carry `data-index`; the door and the retire button carry
//! `data-action`. A single delegated click listener on the grid resolves clicks
//! with [`resolve_click`], so re-rendering never touches live closures.

use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, Url};

use crate::grid::CardView;

pub const ACTION_ATTR: &str = "data-action";
pub const INDEX_ATTR: &str = "data-index";

/// What a click inside a card asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Open or close the door
    Toggle,
    /// Retire or unretire the champion
    Retire,
}

impl CardAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardAction::Toggle => "toggle",
            CardAction::Retire => "retire",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "toggle" => Some(CardAction::Toggle),
            "retire" => Some(CardAction::Retire),
            _ => None,
        }
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Replace the grid's children with one card per view
pub fn render_grid(document: &Document, grid: &Element, cards: &[CardView]) -> Result<(), JsValue> {
    grid.set_inner_html("");
    for card in cards {
        let el = build_card(document, card)?;
        grid.append_child(&el)?;
    }
    Ok(())
}

/// Build one `<article class="card">`
pub fn build_card(document: &Document, view: &CardView) -> Result<Element, JsValue> {
    let card = document.create_element("article")?;
    for class in view.card_classes() {
        card.class_list().add_1(class)?;
    }
    card.set_attribute(INDEX_ATTR, &view.index.to_string())?;

    let inner = document.create_element("div")?;
    inner.set_class_name("card-inner");

    // Door
    let door = document.create_element("button")?;
    door.set_attribute("type", "button")?;
    door.set_class_name("door");
    door.class_list().add_1(&view.theme_class())?;
    door.set_attribute(ACTION_ATTR, CardAction::Toggle.as_str())?;
    door.set_attribute("aria-expanded", bool_attr(view.is_open))?;
    door.set_attribute("aria-label", &view.door_label())?;

    let number = document.create_element("div")?;
    number.set_class_name("door-number");
    number.set_text_content(Some(&view.display_no.to_string()));
    door.append_child(&number)?;

    // Revealed content
    let content = document.create_element("div")?;
    content.set_class_name("content");
    content.set_attribute("aria-hidden", bool_attr(!view.is_open))?;

    let img = document.create_element("img")?;
    img.set_attribute("loading", "lazy")?;
    img.set_attribute("decoding", "async")?;
    img.set_attribute("alt", &view.name)?;
    img.set_attribute("data-src", &view.url)?;
    if view.is_open {
        hydrate_image(&img)?;
    }

    let caption = document.create_element("div")?;
    caption.set_class_name("caption");
    caption.set_text_content(Some(&view.name));

    let actions = document.create_element("div")?;
    actions.set_class_name("actions");
    let retire = document.create_element("button")?;
    retire.set_attribute("type", "button")?;
    retire.set_class_name("btn btn-danger btn-retire");
    retire.set_attribute(ACTION_ATTR, CardAction::Retire.as_str())?;
    retire.set_text_content(Some(view.retire_label()));
    actions.append_child(&retire)?;

    content.append_child(&img)?;
    content.append_child(&caption)?;
    content.append_child(&actions)?;

    inner.append_child(&door)?;
    inner.append_child(&content)?;
    card.append_child(&inner)?;

    Ok(card)
}

/// Load the portrait the first time; later calls are no-ops
fn hydrate_image(img: &Element) -> Result<(), JsValue> {
    if img.get_attribute("src").is_none() {
        if let Some(src) = img.get_attribute("data-src") {
            img.set_attribute("src", &src)?;
        }
    }
    Ok(())
}

/// Flip a card's door in place and return whether it is now open
pub fn toggle_door(card: &Element) -> Result<bool, JsValue> {
    let now_open = !card.class_list().contains("open");
    card.class_list().toggle_with_force("open", now_open)?;

    if let Some(door) = card.query_selector(".door")? {
        door.set_attribute("aria-expanded", bool_attr(now_open))?;
    }
    if let Some(content) = card.query_selector(".content")? {
        content.set_attribute("aria-hidden", bool_attr(!now_open))?;
    }
    if now_open {
        if let Some(img) = card.query_selector("img")? {
            hydrate_image(&img)?;
        }
    }
    Ok(now_open)
}

/// Map a click target to its action, the entry index and the card element
pub fn resolve_click(target: &Element) -> Option<(CardAction, usize, Element)> {
    let control = target.closest("[data-action]").ok()??;
    let action = CardAction::parse(&control.get_attribute(ACTION_ATTR)?)?;
    let card = control.closest(".card").ok()??;
    let index = card.get_attribute(INDEX_ATTR)?.parse().ok()?;
    Some((action, index, card))
}

/// Offer `json` as a file download
pub fn download_json(document: &Document, file_name: &str, json: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(json));
    let options = BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;

    let url = Url::create_object_url_with_blob(&blob)?;
    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(&url);
    link.set_download(file_name);
    link.click();
    Url::revoke_object_url(&url)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn view(is_open: bool) -> CardView {
        CardView {
            index: 3,
            display_no: 2,
            name: "Ahri".to_string(),
            url: "ahri.png".to_string(),
            is_open,
            is_retired: false,
            theme: 4,
            skew_1: true,
            skew_2: false,
        }
    }

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    #[wasm_bindgen_test]
    fn closed_card_defers_image() {
        let card = build_card(&document(), &view(false)).unwrap();
        let img = card.query_selector("img").unwrap().unwrap();
        assert!(img.get_attribute("src").is_none());
        assert_eq!(img.get_attribute("data-src").as_deref(), Some("ahri.png"));
        assert_eq!(card.class_name(), "card skew-1");
        let number = card.query_selector(".door-number").unwrap().unwrap();
        assert_eq!(number.text_content().as_deref(), Some("2"));
    }

    #[wasm_bindgen_test]
    fn toggle_door_hydrates_once() {
        let card = build_card(&document(), &view(false)).unwrap();
        assert!(toggle_door(&card).unwrap());
        let img = card.query_selector("img").unwrap().unwrap();
        assert_eq!(img.get_attribute("src").as_deref(), Some("ahri.png"));
        let door = card.query_selector(".door").unwrap().unwrap();
        assert_eq!(door.get_attribute("aria-expanded").as_deref(), Some("true"));

        assert!(!toggle_door(&card).unwrap());
        assert_eq!(door.get_attribute("aria-expanded").as_deref(), Some("false"));
    }

    #[wasm_bindgen_test]
    fn clicks_resolve_to_actions() {
        let card = build_card(&document(), &view(true)).unwrap();
        let number = card.query_selector(".door-number").unwrap().unwrap();
        let (action, index, _) = resolve_click(&number).unwrap();
        assert_eq!((action, index), (CardAction::Toggle, 3));

        let retire = card.query_selector(".btn-retire").unwrap().unwrap();
        let (action, _, _) = resolve_click(&retire).unwrap();
        assert_eq!(action, CardAction::Retire);

        let caption = card.query_selector(".caption").unwrap().unwrap();
        assert!(resolve_click(&caption).is_none());
    }
}
