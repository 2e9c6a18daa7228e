//! The navigation bar shown at the top of the logged-in pages.

use maud::{Markup, html};

use crate::{endpoints, record::RecordKind};

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-blue-700 rounded-sm sm:bg-transparent
        sm:text-blue-700 sm:p-0 dark:text-white sm:dark:text-blue-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        sm:hover:bg-transparent sm:border-0 sm:hover:text-blue-700 sm:p-0
        dark:text-white sm:dark:hover:text-blue-500 dark:hover:bg-gray-700
        dark:hover:text-white sm:dark:hover:bg-transparent"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

fn records_link(kind: RecordKind, active_endpoint: &str) -> Link<'static> {
    let url = endpoints::records_view(kind);

    Link {
        url,
        title: kind.title(),
        is_current: active_endpoint == url,
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![
            Link {
                url: endpoints::DASHBOARD_VIEW,
                title: "Dashboard",
                is_current: active_endpoint == endpoints::DASHBOARD_VIEW,
            },
            records_link(RecordKind::Income, active_endpoint),
            records_link(RecordKind::Expense, active_endpoint),
            records_link(RecordKind::CreditCard, active_endpoint),
            Link {
                url: endpoints::PROFILE_VIEW,
                title: "Profile",
                is_current: active_endpoint == endpoints::PROFILE_VIEW,
            },
            Link {
                url: endpoints::LOG_OUT,
                title: "Log out",
                is_current: false,
            },
        ];

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href=(endpoints::ROOT)
                        class="flex items-center space-x-3 rtl:space-x-reverse"
                    {
                        span
                            class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            "Cuentas"
                        }
                    }

                    ul
                        class="font-medium flex flex-row space-x-4 sm:space-x-8
                        rtl:space-x-reverse"
                    {
                        @for link in self.links {
                            li { (link.into_html()) }
                        }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use std::collections::HashMap;

    use scraper::{Html, Selector};

    use crate::{endpoints, navigation::NavBar};

    #[test]
    fn set_active_endpoint() {
        let mut cases = HashMap::new();
        cases.insert(endpoints::DASHBOARD_VIEW, true);
        cases.insert(endpoints::INCOMES_VIEW, true);
        cases.insert(endpoints::EXPENSES_VIEW, true);
        cases.insert(endpoints::CREDIT_CARD_VIEW, true);
        cases.insert(endpoints::PROFILE_VIEW, true);

        cases.insert(endpoints::ROOT, false);
        cases.insert(endpoints::LOG_IN_API, false);
        cases.insert(endpoints::LOG_IN_VIEW, false);
        cases.insert(endpoints::LOG_OUT, false);
        cases.insert(endpoints::REGISTER_VIEW, false);
        cases.insert(endpoints::USERS, false);
        cases.insert(endpoints::RECORDS_VIEW, false);

        for (endpoint, should_be_active) in cases {
            let nav_bar = NavBar::new(endpoint);

            assert_link_active(nav_bar, endpoint, should_be_active);
        }
    }

    #[test]
    fn marks_current_page() {
        let html = Html::parse_fragment(&NavBar::new(endpoints::DASHBOARD_VIEW).into_html().into_string());
        let selector = Selector::parse("a[aria-current='page']").unwrap();

        let current = html.select(&selector).collect::<Vec<_>>();

        assert_eq!(current.len(), 1);
        assert_eq!(current[0].value().attr("href"), Some(endpoints::DASHBOARD_VIEW));
    }

    #[test]
    fn links_to_every_record_kind() {
        let html = Html::parse_fragment(&NavBar::new(endpoints::PROFILE_VIEW).into_html().into_string());
        let selector = Selector::parse("a").unwrap();

        let hrefs = html
            .select(&selector)
            .filter_map(|link| link.value().attr("href"))
            .collect::<Vec<_>>();

        for endpoint in [
            endpoints::INCOMES_VIEW,
            endpoints::EXPENSES_VIEW,
            endpoints::CREDIT_CARD_VIEW,
            endpoints::PROFILE_VIEW,
        ] {
            assert!(hrefs.contains(&endpoint), "no link to {endpoint} in {hrefs:?}");
        }
    }

    #[track_caller]
    fn assert_link_active(nav_bar: NavBar<'_>, endpoint: &str, should_be_active: bool) {
        let get_active_string = |is_active: bool| -> &str {
            if is_active {
                "active (true)"
            } else {
                "inactive (false)"
            }
        };

        for link in nav_bar.links {
            if link.url == endpoint {
                assert_eq!(
                    link.is_current,
                    should_be_active,
                    "Link for current page should be {} but got {}",
                    get_active_string(should_be_active),
                    get_active_string(link.is_current),
                )
            } else {
                assert!(
                    !link.is_current,
                    "Link for inactive page should {} but got {}",
                    get_active_string(false),
                    get_active_string(link.is_current)
                )
            }
        }
    }
}
