//! Shell
//!
//! Static route table and the one piece of persistent UI state, the
//! sidebar.

/// Widths below this are treated as a small viewport
pub const SMALL_VIEWPORT_MAX_WIDTH: f64 = 768.0;

/// Client-side routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Sleep,
    Feeding,
    Vomit,
    Growth,
    Upload,
    NotFound,
}

impl Route {
    /// Destinations shown in the side navigation, in order
    pub const NAV: [Route; 6] = [
        Route::Dashboard,
        Route::Sleep,
        Route::Feeding,
        Route::Vomit,
        Route::Growth,
        Route::Upload,
    ];

    /// Resolve a location path; anything unknown is `NotFound`
    pub fn from_path(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::Dashboard,
            "/sleep" => Route::Sleep,
            "/feeding" => Route::Feeding,
            "/vomit" => Route::Vomit,
            "/growth" => Route::Growth,
            "/upload" => Route::Upload,
            _ => Route::NotFound,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Sleep => "/sleep",
            Route::Feeding => "/feeding",
            Route::Vomit => "/vomit",
            Route::Growth => "/growth",
            Route::Upload => "/upload",
            Route::NotFound => "/*any",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Dashboard => "ダッシュボード",
            Route::Sleep => "睡眠分析",
            Route::Feeding => "授乳分析",
            Route::Vomit => "吐き戻し分析",
            Route::Growth => "成長記録",
            Route::Upload => "データ取り込み",
            Route::NotFound => "ページが見つかりません",
        }
    }
}

/// Whether a viewport of this width counts as small
pub fn is_small_viewport(width: f64) -> bool {
    width < SMALL_VIEWPORT_MAX_WIDTH
}

/// Sidebar open/closed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarState {
    open: bool,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self { open: true }
    }
}

impl SidebarState {
    /// Start closed on small viewports, open otherwise
    pub fn for_width(width: f64) -> Self {
        Self {
            open: !is_small_viewport(width),
        }
    }

    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(self) -> Self {
        Self { open: !self.open }
    }

    /// State after the user picks a destination
    pub fn after_navigate(self, viewport_width: f64) -> Self {
        if is_small_viewport(viewport_width) {
            Self { open: false }
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_round_trip() {
        for route in Route::NAV {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn test_unknown_route() {
        assert_eq!(Route::from_path("/nope"), Route::NotFound);
        assert_eq!(Route::from_path("/sleep/"), Route::Sleep);
        assert_eq!(Route::from_path("/vomit?x=1"), Route::Vomit);
        assert_eq!(Route::from_path(""), Route::Dashboard);
    }

    #[test]
    fn test_sidebar_closes_on_small_viewport_only() {
        let open = SidebarState::default();
        assert!(open.is_open());
        assert!(!open.after_navigate(375.0).is_open());
        assert!(open.after_navigate(1280.0).is_open());
        assert!(!open.toggle().is_open());
    }

    #[test]
    fn test_sidebar_initial_width() {
        assert!(!SidebarState::for_width(767.0).is_open());
        assert!(SidebarState::for_width(768.0).is_open());
    }
}
