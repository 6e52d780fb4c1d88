//! HTML views for the index and detail pages.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating,
//! so every interpolated content value is escaped.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::model::RecipeSummary;
use crate::pages::index::IndexProps;
use crate::pages::recipe::DetailProps;
use crate::pages::{recipe_route, PageState, Redirect};
use crate::rich_text;

const SITE_TITLE: &str = "Recipes";

const BASE_CSS: &str = "\
body { font-family: sans-serif; max-width: 1200px; margin: 0 auto; padding: 0 20px; color: #333; }
header h1 { text-transform: uppercase; letter-spacing: 2px; }
header a { color: inherit; text-decoration: none; }
img { max-width: 100%; height: auto; }
";

const INDEX_CSS: &str = "\
.recipe-list { display: grid; grid-template-columns: 1fr 1fr; grid-gap: 20px 60px; }
.card { box-shadow: 1px 3px 5px rgba(0,0,0,0.1); }
.card .content { padding: 16px; }
";

const DETAIL_CSS: &str = "\
h2, h3 { text-transform: uppercase; }
.banner h2 { margin: 0; background: #fff; display: inline-block; padding: 20px; position: relative; top: -60px; left: -10px; box-shadow: 1px 3px 5px rgba(0,0,0,0.1); }
.info p { margin: 0; }
";

const SKELETON_CSS: &str = "\
.skeleton > div { background: #ddd; border-radius: 4px; margin: 20px 0; }
.s-banner { height: 300px; }
.s-header { height: 40px; width: 60%; }
.s-content { height: 20px; width: 90%; }
";

// ============================================================================
// Layout
// ============================================================================

fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(BASE_CSS)) (PreEscaped(css)) }
            }
            body {
                header {
                    a href="/" { h1 { (SITE_TITLE) } }
                }
                main { (content) }
            }
        }
    }
}

// ============================================================================
// Index page
// ============================================================================

/// One card per recipe, keyed by entry id
pub fn recipe_card(recipe: &RecipeSummary) -> Markup {
    let title = recipe.title().unwrap_or("Untitled recipe");

    html! {
        div.card data-key=(recipe.id()) {
            @if let Some(thumb) = &recipe.thumbnail {
                div.featured {
                    img src=(thumb.url) alt=(title) width=(thumb.width) height=(thumb.height);
                }
            }
            div.content {
                div.info {
                    h4 { (title) }
                    @if let Some(minutes) = recipe.cooking_time() {
                        p { "Takes approx " (minutes.to_string()) " mins to make" }
                    }
                }
                @if let Some(slug) = recipe.slug() {
                    div.actions {
                        a href=(recipe_route(slug)) { "Cook this" }
                    }
                }
            }
        }
    }
}

pub fn index_page(props: &IndexProps) -> Markup {
    let content = html! {
        div.recipe-list {
            @for recipe in &props.recipes {
                (recipe_card(recipe))
            }
        }
    };
    base_document(SITE_TITLE, INDEX_CSS, content)
}

// ============================================================================
// Detail page
// ============================================================================

/// Loading placeholder shown while a new slug is being generated
pub fn skeleton() -> Markup {
    html! {
        div.skeleton {
            div.s-banner {}
            div.s-header {}
            div.s-content {}
            div.s-content {}
            div.s-content {}
        }
    }
}

/// Ingredients separated by ", " and closed with "."
fn ingredient_list(ingredients: &[String]) -> Markup {
    let last = ingredients.len().saturating_sub(1);
    html! {
        @for (i, ingredient) in ingredients.iter().enumerate() {
            span.ingredient { (ingredient) }
            @if i < last { ", " } @else { "." }
        }
    }
}

/// Render the detail page; a placeholder renders the skeleton and nothing else
pub fn detail_page(state: &PageState<DetailProps>, image_scale: u32) -> Markup {
    let props = match state {
        PageState::Placeholder => {
            return base_document(SITE_TITLE, SKELETON_CSS, skeleton());
        }
        PageState::Ready(props) => props,
    };

    let fields = &props.recipe.fields;
    let image = &fields.featured_image;
    let (width, height) = image.scaled(image_scale);

    let content = html! {
        div.banner {
            img src=(image.url) alt=(fields.title) width=(width) height=(height);
            h2 { (fields.title) }
        }
        div.info {
            p { "Take about " (fields.cooking_time.to_string()) " mins to cook." }
            h3 { "Ingredients: " }
            (ingredient_list(&fields.ingredients))
        }
        div.method {
            h3 { "Method:" }
            div { (rich_text::render(&fields.method)) }
        }
    };

    base_document(&format!("{} | {}", fields.title, SITE_TITLE), DETAIL_CSS, content)
}

/// Stand-in page for a route that now redirects
pub fn redirect_stub(redirect: &Redirect) -> Markup {
    let refresh = format!("0; url={}", redirect.destination);
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content=(refresh);
                title { "Redirecting…" }
            }
            body {
                a href=(redirect.destination) { "Redirecting…" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures::{image_asset, recipe_entry};
    use crate::content::EntryCollection;
    use crate::model::RecipeDetail;

    fn detail_props(ingredients: &[&str]) -> DetailProps {
        let mut entry = recipe_entry("e1", "soup", "Soup", "img1");
        entry.fields.insert(
            "ingredients".to_string(),
            serde_json::to_value(ingredients).unwrap(),
        );
        let mut collection = EntryCollection::new(vec![entry.clone()]);
        collection.includes.assets = vec![image_asset("img1", 300, 200)];
        DetailProps {
            recipe: RecipeDetail::from_entry(&entry, &collection).unwrap(),
        }
    }

    #[test]
    fn ingredient_list_commas_and_period() {
        let html = ingredient_list(&["water".to_string(), "salt".to_string()]).into_string();
        assert_eq!(
            html,
            r#"<span class="ingredient">water</span>, <span class="ingredient">salt</span>."#
        );
    }

    #[test]
    fn ingredient_list_single() {
        let html = ingredient_list(&["rice".to_string()]).into_string();
        assert_eq!(html, r#"<span class="ingredient">rice</span>."#);
    }

    #[test]
    fn ingredient_list_empty() {
        assert_eq!(ingredient_list(&[]).into_string(), "");
    }

    #[test]
    fn detail_page_scales_banner() {
        let html = detail_page(&PageState::Ready(detail_props(&["water"])), 4).into_string();
        assert!(html.contains(r#"src="https://images.ctfassets.net/space/img1/photo.jpg""#));
        assert!(html.contains(r#"width="1200""#));
        assert!(html.contains(r#"height="800""#));
        assert!(html.contains("Take about 30 mins to cook."));
        assert!(html.contains("<p>Boil the water.</p>"));
    }

    #[test]
    fn decimal_cooking_time_renders_as_stored() {
        let mut props = detail_props(&["water"]);
        props.recipe.fields.cooking_time = serde_json::Number::from_f64(7.5).unwrap();
        let html = detail_page(&PageState::Ready(props), 4).into_string();
        assert!(html.contains("Take about 7.5 mins to cook."));
    }

    #[test]
    fn placeholder_renders_only_skeleton() {
        let html = detail_page(&PageState::Placeholder, 4).into_string();
        assert!(html.contains("skeleton"));
        assert!(!html.contains(r#"class="banner""#));
        assert!(!html.contains("Method:"));
    }

    #[test]
    fn base_document_includes_doctype() {
        let doc = base_document("Test", "", html! { p { "test" } }).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn redirect_stub_points_at_destination() {
        let html = redirect_stub(&Redirect::temporary("/")).into_string();
        assert!(html.contains(r#"content="0; url=/""#));
    }
}
