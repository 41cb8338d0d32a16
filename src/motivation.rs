//! The friendly bits at the top of the dashboard: a greeting and a quote of the day.

use serde::Serialize;
use uuid::Uuid;

/// Picks a greeting for the hour of the day (0-23).
pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 17 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

/// The first word of the user's display name, or "Student" when there is none.
pub fn first_name(display_name: Option<&str>) -> &str {
    display_name
        .and_then(|name| name.split_whitespace().next())
        .unwrap_or("Student")
}

/// A quote drawn from [`QUOTES`], along with the seed that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub seed: u64,
    pub text: &'static str,
}

impl Quote {
    /// Deterministically selects a quote. The same seed always gives the same quote.
    pub fn draw(seed: u64) -> Self {
        let ix = (seed % QUOTES.len() as u64) as usize;
        Self {
            seed,
            text: QUOTES[ix],
        }
    }

    /// Selects a quote with a fresh seed.
    pub fn random() -> Self {
        Self::draw(Uuid::new_v4().as_u128() as u64)
    }
}

pub const QUOTES: &[&str] = &[
    "The only way to do great work is to love what you do. – Steve Jobs",
    "Believe you can and you're halfway there. – Theodore Roosevelt",
    "The future belongs to those who believe in the beauty of their dreams. – Eleanor Roosevelt",
    "Success is not final, failure is not fatal: it is the courage to continue that counts. – Winston Churchill",
    "Education is the most powerful weapon which you can use to change the world. – Nelson Mandela",
    "Don't wish it were easier, wish you were better. – Jim Rohn",
    "The expert in anything was once a beginner. – Helen Hayes",
    "Patience, persistence and perspiration make an unbeatable combination for success. – Napoleon Hill",
    "You are capable of more than you know. – Unknown",
    "The beautiful thing about learning is that no one can take it away from you. – B.B. King",
    "Strive for progress, not perfection. – Unknown",
    "It always seems impossible until it's done. – Nelson Mandela",
    "The mind is everything. What you think you become. – Buddha",
    "Hard work beats talent when talent doesn't work hard. – Tim Notke",
    "Your time is limited, don't waste it living someone else's life. – Steve Jobs",
    "Failure is the opportunity to begin again more intelligently. – Henry Ford",
    "The best way to predict the future is to create it. – Peter Drucker",
    "Setting goals is the first step in turning the invisible into the visible. – Tony Robbins",
    "The only limit to our realization of tomorrow will be our doubts of today. – Franklin D. Roosevelt",
    "Do not wait to strike till the iron is hot; but make it hot by striking. – William Butler Yeats",
    "Genius is one percent inspiration and ninety-nine percent perspiration. – Thomas Edison",
    "The only place where success comes before work is in the dictionary. – Vidal Sassoon",
    "Go confidently in the direction of your dreams! Live the life you've imagined. – Henry David Thoreau",
    "You don't have to be great to start, but you have to start to be great. – Zig Ziglar",
    "Our greatest weakness lies in giving up. The most certain way to succeed is always to try just one more time. – Thomas A. Edison",
    "The roots of education are bitter, but the fruit is sweet. – Aristotle",
    "Push yourself, because no one else is going to do it for you. – Unknown",
    "Success is the sum of small efforts, repeated day in and day out. – Robert Collier",
    "Don't stop when you're tired. Stop when you're done. – Unknown",
    "The difference between ordinary and extraordinary is that little extra. – Jimmy Johnson",
    "Study while others are sleeping; work while others are loitering; prepare while others are playing; and dream while others are wishing. – William Arthur Ward",
    "You miss 100% of the shots you don't take. – Wayne Gretzky",
    "It does not matter how slowly you go as long as you do not stop. – Confucius",
    "Great things never come from comfort zones. – Unknown",
    "To accomplish great things, we must not only act, but also dream; not only plan, but also believe. – Anatole France",
    "The future depends on what you do today. – Mahatma Gandhi",
    "If you are not willing to learn, no one can help you. If you are determined to learn, no one can stop you. – Unknown",
    "The expert was once a beginner who kept going. – Unknown",
    "Focus on being productive instead of busy. – Tim Ferriss",
    "Challenges are what make life interesting and overcoming them is what makes life meaningful. – Joshua J. Marine",
    "Motivation is what gets you started. Habit is what keeps you going. – Jim Ryun",
    "Learn from yesterday, live for today, hope for tomorrow. – Albert Einstein",
    "Success is walking from failure to failure with no loss of enthusiasm. – Winston Churchill",
    "The best way to gain self-confidence is to do what you are afraid to do. – Unknown",
    "Believe in yourself and all that you are. Know that there is something inside you that is greater than any obstacle. – Christian D. Larson",
    "It's not about perfect. It's about effort. And when you bring that effort every single day, that's where transformation happens. – Jillian Michaels",
    "Your education is a dress rehearsal for a life that is yours to lead. – Nora Ephron",
    "Work hard in silence, let your success be your noise. – Frank Ocean",
    "The journey of a thousand miles begins with a single step. – Lao Tzu",
    "Stay curious. Keep learning. Keep growing. – Unknown",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_thresholds() {
        assert_eq!(greeting(0), "Good morning");
        assert_eq!(greeting(11), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(16), "Good afternoon");
        assert_eq!(greeting(17), "Good evening");
        assert_eq!(greeting(23), "Good evening");
    }

    #[test]
    fn test_first_name() {
        assert_eq!(first_name(Some("Ada Lovelace")), "Ada");
        assert_eq!(first_name(Some("  Grace  ")), "Grace");
        assert_eq!(first_name(Some("")), "Student");
        assert_eq!(first_name(None), "Student");
    }

    #[test]
    fn test_quote_count() {
        assert_eq!(QUOTES.len(), 50);
    }

    #[test]
    fn test_draw_is_deterministic() {
        assert_eq!(Quote::draw(7), Quote::draw(7));
        assert_eq!(Quote::draw(0).text, QUOTES[0]);
        assert_eq!(Quote::draw(51).text, QUOTES[1]);
        assert_eq!(Quote::draw(u64::MAX).text, QUOTES[(u64::MAX % 50) as usize]);
    }

    #[test]
    fn test_random_draws_from_list() {
        let quote = Quote::random();
        assert!(QUOTES.contains(&quote.text));
        assert_eq!(Quote::draw(quote.seed), quote);
    }
}
