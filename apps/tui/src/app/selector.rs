use canon_core::{Continent, ContinentGroup, SelectorDialog};

/// One line of the selector tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorRow {
    Continent {
        continent: Continent,
        countries: usize,
        selected: usize,
        total_films: u64,
        expanded: bool,
    },
    Country {
        name: String,
        continent: Continent,
        film_count: u64,
        pending: bool,
    },
}

impl SelectorRow {
    pub const fn continent(&self) -> Continent {
        match self {
            Self::Continent { continent, .. } | Self::Country { continent, .. } => *continent,
        }
    }
}

/// Flattens the search-filtered groups into rows. Countries appear only
/// under expanded continents.
pub fn selector_rows(dialog: &SelectorDialog, groups: &[ContinentGroup]) -> Vec<SelectorRow> {
    let mut rows = Vec::new();

    for group in dialog.visible_groups(groups) {
        let expanded = dialog.is_expanded(group.continent);
        rows.push(SelectorRow::Continent {
            continent: group.continent,
            countries: group.countries.len(),
            selected: dialog.selected_in(&group),
            total_films: group.total_films,
            expanded,
        });

        if expanded {
            rows.extend(group.countries.iter().map(|country| SelectorRow::Country {
                name: country.name.clone(),
                continent: country.continent,
                film_count: country.film_count,
                pending: dialog.is_pending(&country.name),
            }));
        }
    }

    rows
}
