//! Fixtures shared by the unit tests: demo-site markup, a one-shot HTTP
//! server and an in-memory browser session.

use std::cell::RefCell;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::rc::Rc;
use std::thread;
use crate::browser::{BrowserSession, ControlState, SessionLauncher};
use crate::error::SessionError;

pub struct CardFixture {
    title: String,
    description: String,
    price: String,
    rating: u8,
    reviews: String,
}

impl CardFixture {
    pub fn new(title: &str, price: &str, rating: u8, reviews: &str) -> Self {
        CardFixture {
            title: title.to_string(),
            description: String::new(),
            price: price.to_string(),
            rating,
            reviews: reviews.to_string(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// Card markup laid out like the webscraper.io e-commerce test site.
pub fn card_html(card: &CardFixture) -> String {
    format!(
        r#"<div class="col-md-4 col-xl-4 col-lg-4">
  <div class="card thumbnail">
    <div class="card-body">
      <img class="img-fluid card-img-top image img-responsive" alt="item">
      <div class="caption">
        <h4 class="price float-end card-title pull-right">{price}</h4>
        <h4><a href="/test-sites/e-commerce/more/product/1" class="title" title="{title}">{title}</a></h4>
        <p class="description card-text">{description}</p>
      </div>
      <div class="ratings">
        <p class="review-count float-end">{reviews}</p>
        <p data-rating="{rating}"><span class="ws-icon ws-icon-star"></span></p>
      </div>
    </div>
  </div>
</div>"#,
        price = escape(&card.price),
        title = escape(&card.title),
        description = escape(&card.description),
        reviews = escape(&card.reviews),
        rating = card.rating,
    )
}

pub fn page_html(cards: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><title>Web Scraper Test Sites</title></head>
<body>
  <div class="container test-site">
    <div class="row ecomerce-items ecomerce-items-more">
      {}
    </div>
  </div>
</body>
</html>"#,
        cards.join("\n")
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Serves exactly one HTTP response and returns the base URL.
pub fn serve_once(status: &str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    let status = status.to_string();

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while let Ok(n) = stream.read(&mut buf) {
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    format!("http://{}/", addr)
}

#[derive(Debug, Clone, Default)]
pub struct FakeStats {
    pub navigated: Option<String>,
    pub clicks: usize,
    pub released: bool,
}

/// Serves `pages[k]` after `k` clicks; the control is available for
/// `expansions` clicks.
pub struct FakeSession {
    pages: Vec<String>,
    current: usize,
    expansions: usize,
    pub hidden_control: bool,
    pub fail_control_checks: bool,
    pub fail_navigation: bool,
    stats: Rc<RefCell<FakeStats>>,
}

impl FakeSession {
    pub fn with_pages(pages: Vec<String>, expansions: usize) -> Self {
        FakeSession {
            pages,
            current: 0,
            expansions,
            hidden_control: false,
            fail_control_checks: false,
            fail_navigation: false,
            stats: Rc::new(RefCell::new(FakeStats::default())),
        }
    }
}

impl BrowserSession for FakeSession {
    fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        if self.fail_navigation {
            return Err(SessionError::Navigation {
                url: url.to_string(),
                reason: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            });
        }
        self.stats.borrow_mut().navigated = Some(url.to_string());
        Ok(())
    }

    fn page_source(&mut self) -> Result<String, SessionError> {
        let idx = self.current.min(self.pages.len().saturating_sub(1));
        Ok(self.pages.get(idx).cloned().unwrap_or_default())
    }

    fn control_state(&mut self, _selector: &str) -> Result<ControlState, SessionError> {
        if self.fail_control_checks {
            return Err(SessionError::Protocol("target crashed".to_string()));
        }
        if self.current >= self.expansions {
            Ok(ControlState::Absent)
        } else if self.hidden_control {
            Ok(ControlState::Hidden)
        } else {
            Ok(ControlState::Clickable)
        }
    }

    fn click(&mut self, _selector: &str) -> Result<bool, SessionError> {
        if self.current >= self.expansions {
            return Ok(false);
        }
        self.current += 1;
        self.stats.borrow_mut().clicks += 1;
        Ok(true)
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.stats.borrow_mut().released = true;
    }
}

/// Hands out its single session once; later launches fail.
#[derive(Clone)]
pub struct FakeLauncher {
    session: Rc<RefCell<Option<FakeSession>>>,
    stats: Rc<RefCell<FakeStats>>,
}

impl FakeLauncher {
    pub fn new(session: FakeSession) -> Self {
        let stats = Rc::clone(&session.stats);
        FakeLauncher {
            session: Rc::new(RefCell::new(Some(session))),
            stats,
        }
    }

    pub fn failing() -> Self {
        FakeLauncher {
            session: Rc::new(RefCell::new(None)),
            stats: Rc::new(RefCell::new(FakeStats::default())),
        }
    }

    pub fn stats(&self) -> FakeStats {
        self.stats.borrow().clone()
    }
}

impl SessionLauncher for FakeLauncher {
    type Session = FakeSession;

    fn launch(&self) -> Result<FakeSession, SessionError> {
        self.session
            .borrow_mut()
            .take()
            .ok_or_else(|| SessionError::Launch("chrome executable not found".to_string()))
    }
}
