mod api;
mod components;
mod config;
mod coords;
mod geolocation;
mod pages;

use dioxus::prelude::*;

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Title { "Papapp - Etiquetado de cultivos" }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1, maximum-scale=1" }
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        pages::labeler::Labeler {}
    }
}

fn main() {
    launch(App);
}
