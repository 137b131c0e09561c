use std::cmp::Ordering;

use crate::structs::genre::Genre;
use crate::structs::sorting_and_order_arguments::{SortProperty, SortingAndOrderArguments};

const SEED_GENRES: [&str; 6] = [
    "Drama",
    "Comedy",
    "Thriller",
    "Documentary",
    "Animation",
    "Western",
];

/// Read-only list of genres, filled once at startup
#[derive(Debug, Clone, Default)]
pub struct GenreCatalog {
    genres: Vec<Genre>,
}

impl GenreCatalog {
    pub fn new(genres: Vec<Genre>) -> Self {
        Self { genres }
    }

    pub fn seeded() -> Self {
        let genres = SEED_GENRES
            .iter()
            .zip(1..)
            .map(|(name, id)| Genre::new(id, *name))
            .collect();
        Self::new(genres)
    }

    pub fn count(&self) -> usize {
        self.genres.len()
    }

    /// Returns one page of genres.
    ///
    /// Rows are ordered by `sort` when it is present, otherwise they keep
    /// their insertion order. `order` is only consulted alongside `sort`.
    pub fn list(&self, arguments: &SortingAndOrderArguments, page_size: i32) -> Vec<Genre> {
        let mut genres: Vec<&Genre> = self.genres.iter().collect();

        if let Some(property) = arguments.sort_property() {
            genres.sort_by(|a, b| {
                let ordering = compare(a, b, property);
                if arguments.is_descending() {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        let offset = usize::try_from(arguments.offset().unwrap_or(0)).unwrap_or(0);
        let page_size = usize::try_from(page_size).unwrap_or(0);

        genres
            .into_iter()
            .skip(offset)
            .take(page_size)
            .cloned()
            .collect()
    }
}

fn compare(a: &Genre, b: &Genre, property: SortProperty) -> Ordering {
    match property {
        SortProperty::Id => a.id.cmp(&b.id),
        SortProperty::Name => a.name.cmp(&b.name),
    }
}
