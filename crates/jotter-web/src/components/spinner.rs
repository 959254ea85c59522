use dioxus::prelude::*;

#[component]
pub fn Spinner() -> Element {
    rsx! {
        div {
            role: "progressbar",
            style: "
                display: flex;
                justify-content: center;
                padding: 48px 0;
                color: #757575;
            ",
            "Loading..."
        }
    }
}
