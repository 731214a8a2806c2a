#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Route {
    Lobby,
    Game { code: String },
    NotFound,
}

impl Route {
    pub(crate) fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Lobby,
            ["game", code] => Self::Game {
                code: (*code).to_string(),
            },
            _ => Self::NotFound,
        }
    }

    pub(crate) fn path(&self) -> String {
        match self {
            Self::Lobby => "/".to_string(),
            Self::Game { code } => format!("/game/{code}"),
            Self::NotFound => "/404".to_string(),
        }
    }

    pub(crate) fn current() -> Self {
        match gloo::utils::window().location().pathname() {
            Ok(path) => Self::parse(&path),
            Err(err) => {
                log::error!("could not read location: {err:?}");
                Self::Lobby
            }
        }
    }

    /// Full page navigation, keeping the hash arguments.
    pub(crate) fn navigate(&self) {
        let location = gloo::utils::window().location();
        let hash = location.hash().unwrap_or_default();
        if let Err(err) = location.set_href(&format!("{}{hash}", self.path())) {
            log::error!("could not navigate to {}: {err:?}", self.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/"), Route::Lobby);
        assert_eq!(Route::parse(""), Route::Lobby);
        assert_eq!(
            Route::parse("/game/abc123"),
            Route::Game {
                code: "abc123".to_string()
            }
        );
        assert_eq!(
            Route::parse("/game/abc123/"),
            Route::Game {
                code: "abc123".to_string()
            }
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::parse("/game"), Route::NotFound);
        assert_eq!(Route::parse("/game/a/b"), Route::NotFound);
        assert_eq!(Route::parse("/settings"), Route::NotFound);
    }

    #[test]
    fn game_path_round_trips() {
        let route = Route::Game {
            code: "xyz".to_string(),
        };
        assert_eq!(Route::parse(&route.path()), route);
    }
}
