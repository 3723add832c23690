use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::{CastMember, MovieDetails, PLACEHOLDER_POSTER_URL};
use crate::state::AppState;

/// Optional navigation parameter carried by recommendation links
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub movie: Option<String>,
}

/// Everything a rendered recommendation card needs
struct RecommendationCard {
    title: String,
    link: String,
    poster_url: String,
    missing_poster: bool,
}

/// Handler for the page itself.
///
/// One request is one full recompute: resolve the selection, run the
/// recommender, fetch metadata for the selected movie and each
/// recommendation, render. A `?movie=` value that is not an exact table
/// title is ignored and the default selection is used instead.
pub async fn render(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> AppResult<Html<String>> {
    let selected = resolve_selection(&state, params.movie.as_deref()).to_string();

    let record = state
        .table
        .position_of(&selected)
        .and_then(|row| state.table.get(row));

    let (details, poster, cast) = match record {
        Some(record) => (
            state.metadata.details(record.tmdb_id).await,
            state.metadata.poster(record.tmdb_id).await,
            state.metadata.cast(record.tmdb_id).await,
        ),
        None => (MovieDetails::placeholder(), None, Vec::new()),
    };

    let mut cards = Vec::new();
    if record.is_some() {
        for rec in state.recommender.recommend(&selected)? {
            let poster = state.metadata.poster(rec.tmdb_id).await;
            cards.push(RecommendationCard {
                link: format!("/?movie={}", urlencoding::encode(&rec.title)),
                missing_poster: poster.is_none(),
                poster_url: poster.unwrap_or_else(|| PLACEHOLDER_POSTER_URL.to_string()),
                title: rec.title,
            });
        }
    }

    Ok(Html(render_page(
        &state, &selected, &details, &poster, &cast, &cards,
    )))
}

/// The title this render centers on: a valid `?movie=` parameter wins, an
/// absent or unknown one leaves the selection at the default.
fn resolve_selection<'a>(state: &'a AppState, param: Option<&'a str>) -> &'a str {
    match param {
        Some(title) if state.table.contains_title(title) => title,
        _ => state.default_title(),
    }
}

fn render_page(
    state: &AppState,
    selected: &str,
    details: &MovieDetails,
    poster: &Option<String>,
    cast: &[CastMember],
    cards: &[RecommendationCard],
) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Smart Movie Recommender</title>\n<style>\n\
         body { font-family: sans-serif; margin: 2em auto; max-width: 64em; }\n\
         .columns { display: flex; gap: 2em; }\n\
         .poster img { width: 100%; border-radius: 8px; }\n\
         .poster { flex: 2; } .actors { flex: 3; }\n\
         .cast-grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1em; }\n\
         .cast-grid img { width: 100px; }\n\
         .cast-grid figcaption { font-size: small; }\n\
         .strip { display: grid; grid-template-columns: repeat(5, 1fr); gap: 1em; }\n\
         .strip a { text-decoration: none; color: inherit; }\n\
         .strip img { width: 100%; border-radius: 8px; }\n\
         .strip .card-title { text-align: center; font-weight: bold; margin-top: 0.5em; }\n\
         .no-poster { text-align: center; font-style: italic; font-size: small; color: gray; }\n\
         </style>\n</head>\n<body>\n",
    );

    html.push_str("<h1>Smart Movie Recommender</h1>\n");

    // Selection control
    html.push_str("<form method=\"get\" action=\"/\">\n<label for=\"movie\">Select or type a movie:</label>\n");
    html.push_str("<select id=\"movie\" name=\"movie\">\n");
    for title in state.table.titles() {
        let escaped = html_escape(title);
        if title == selected {
            html.push_str(&format!(
                "<option value=\"{escaped}\" selected>{escaped}</option>\n"
            ));
        } else {
            html.push_str(&format!("<option value=\"{escaped}\">{escaped}</option>\n"));
        }
    }
    html.push_str("</select>\n<button type=\"submit\">Show</button>\n</form>\n");

    // Metadata panel
    html.push_str(&format!("<h2>{}</h2>\n", html_escape(&details.title)));
    html.push_str(&format!("<p>{}</p>\n", html_escape(&details.overview)));

    // Poster and cast, side by side
    html.push_str("<div class=\"columns\">\n<div class=\"poster\">\n");
    match poster {
        Some(url) => html.push_str(&format!(
            "<img src=\"{}\" alt=\"Poster\">\n",
            html_escape(url)
        )),
        None => html.push_str("<p class=\"no-poster\">No poster available.</p>\n"),
    }
    html.push_str("</div>\n<div class=\"actors\">\n<p><strong>Actors:</strong></p>\n<div class=\"cast-grid\">\n");
    for member in cast {
        html.push_str(&format!(
            "<figure><img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption></figure>\n",
            html_escape(&member.image_url),
            html_escape(&member.name),
            html_escape(&member.name),
        ));
    }
    html.push_str("</div>\n</div>\n</div>\n");

    // Recommendation strip
    html.push_str("<hr>\n<h3>You might also like:</h3>\n");
    html.push_str("<p>(Click any of these recommended movies for further recommendation.)</p>\n");
    html.push_str("<div class=\"strip\">\n");
    for card in cards {
        html.push_str(&format!(
            "<a href=\"{}\"><img src=\"{}\" alt=\"{}\"><div class=\"card-title\">{}</div>{}</a>\n",
            html_escape(&card.link),
            html_escape(&card.poster_url),
            html_escape(&card.title),
            html_escape(&card.title),
            if card.missing_poster {
                "<div class=\"no-poster\">No poster available.</div>"
            } else {
                ""
            },
        ));
    }
    html.push_str("</div>\n</body>\n</html>\n");

    html
}

fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
