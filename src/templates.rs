use maud::{DOCTYPE, Markup, html};

use crate::{
    models::Movie,
    ui::{FormValues, View},
    uploads::UPLOADS_PREFIX,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
const DELETE_PROMPT: &str = "return confirm('Are you sure you want to delete this movie?')";

/// Renders whichever screen `view` stands for. `base_url` is prepended to
/// uploaded image paths.
pub fn render(view: &View, base_url: &str) -> String {
    match view {
        View::Listing { movies, alert } => page(
            "List of movies",
            html! {
                div class="max-w-6xl mx-auto px-6 py-10" {
                    h1 class="text-3xl font-bold text-gray-900 text-center" { "List of movies" }
                    (alert_box(alert.as_deref()))
                    div class="mt-6" {
                        a class="inline-block rounded-md border bg-white px-6 py-2 text-xl hover:bg-gray-100" href="/add" { "Add" }
                    }
                    @if movies.is_empty() {
                        p class="mt-8 text-gray-600" { "No movies found. Add some using the form or the API." }
                    } @else {
                        div class="mt-8 grid gap-6 sm:grid-cols-2 md:grid-cols-4" {
                            @for movie in movies {
                                (movie_card(movie, base_url))
                            }
                        }
                    }
                }
            },
        ),
        View::Adding { form, alert } => page(
            "Add movies",
            movie_form("Add movies", "/add", form, None, alert.as_deref()),
        ),
        View::Editing { movie, form, alert } => page(
            "Update movie",
            movie_form(
                "Update movie",
                &format!("/edit/{}", movie.id),
                form,
                Some(movie.image_url.as_deref().unwrap_or_default()),
                alert.as_deref(),
            ),
        ),
    }
}

pub fn error_page(message: &str) -> String {
    page(
        "Error",
        html! {
            div class="max-w-xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-2xl font-bold text-gray-900" { "Error" }
                    p class="mt-4 text-gray-700" { (message) }
                    a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                }
            }
        },
    )
}

/// Uploaded files live on the API origin; anything else is taken as an absolute URL.
pub fn image_src(image_url: Option<&str>, base_url: &str) -> Option<String> {
    let url = image_url.filter(|u| !u.is_empty())?;
    if url.starts_with(UPLOADS_PREFIX) {
        Some(format!("{base_url}{url}"))
    } else {
        Some(url.to_string())
    }
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" { (body) }
        }
    }
    .into_string()
}

fn alert_box(alert: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = alert {
            div class="mt-4 rounded-md border border-red-300 bg-red-50 px-4 py-3 text-red-800" role="alert" {
                (message)
            }
        }
    }
}

fn movie_card(movie: &Movie, base_url: &str) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg overflow-hidden" {
            div class="h-64 bg-gray-700 flex items-center justify-center" {
                @if let Some(src) = image_src(movie.image_url.as_deref(), base_url) {
                    img class="h-full w-full object-cover" src=(src) alt=(movie.name);
                } @else {
                    span class="text-white text-xl" { "IMAGE" }
                }
            }
            div class="p-4 space-y-1 text-sm text-gray-800" {
                p { "Name: " (movie.name) }
                p { "Release Date: " (movie.kind.as_deref().unwrap_or_default()) }
                p {
                    "Ratings: "
                    @if let Some(rating) = movie.rating { (rating) } @else { "-" }
                    "/10"
                }
                div class="flex justify-between pt-2" {
                    a class="rounded bg-blue-600 px-3 py-1 text-white hover:bg-blue-700" href=(format!("/edit/{}", movie.id)) { "Edit" }
                    form method="post" action=(format!("/delete/{}", movie.id)) onsubmit=(DELETE_PROMPT) {
                        button class="rounded bg-red-600 px-3 py-1 text-white hover:bg-red-700" type="submit" { "Delete" }
                    }
                }
            }
        }
    }
}

fn movie_form(
    heading: &str,
    action: &str,
    values: &FormValues,
    current_image_url: Option<&str>,
    alert: Option<&str>,
) -> Markup {
    let input = "mt-1 w-full rounded-md border border-gray-300 px-3 py-2";
    html! {
        div class="max-w-xl mx-auto px-6 py-10" {
            h1 class="text-3xl font-bold text-gray-900 text-center" { (heading) }
            (alert_box(alert))
            form class="mt-6 space-y-4 bg-white shadow rounded-lg p-6" method="post" action=(action) enctype="multipart/form-data" {
                label class="block" {
                    span class="text-sm font-medium text-gray-700" { "Movie name:" }
                    input class=(input) type="text" name="name" value=(values.name) required;
                }
                label class="block" {
                    span class="text-sm font-medium text-gray-700" { "Released Date:" }
                    input class=(input) type="text" name="type" value=(values.kind);
                }
                div {
                    span class="text-sm font-medium text-gray-700" { "Upload image:" }
                    div class="mt-1 flex gap-2" {
                        input type="file" name="image" accept="image/*";
                        input class=(input) type="text" name="imageUrlLink" placeholder="Add or change link" value=(values.image_url_link);
                    }
                }
                label class="block" {
                    span class="text-sm font-medium text-gray-700" { "Rating:" }
                    input class=(input) type="number" step="0.1" name="rating" value=(values.rating);
                }
                @if let Some(current) = current_image_url {
                    input type="hidden" name="currentImageUrl" value=(current);
                }
                div class="flex gap-2" {
                    button class="flex-grow rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" {
                        @if current_image_url.is_some() { "Save" } @else { "Add" }
                    }
                    a class="flex-grow rounded-md border px-4 py-2 text-center hover:bg-gray-100" href="/" { "Cancel" }
                }
            }
        }
    }
}
