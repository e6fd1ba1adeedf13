//! Static page chrome: navigation, hero, process, about and footer.

use leptos::prelude::*;

use crate::catalog::CHECKOUT_URL;

const PROCESS_STEPS: [(&str, &str, &str); 3] = [
    ("01", "Audit", "I dissect your current workflow to identify bottlenecks and manual drains."),
    ("02", "Automate", "We implement custom AI agents (like the ones below) to handle the grunt work."),
    ("03", "Scale", "You get a documented operating system to grow without adding more hours."),
];

#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav>
            <div class="brand">"Lumina."</div>
            <a href="#process">"How It Works"</a>
            <a href="#about">"About"</a>
            <a href="#store">"Store"</a>
            <a href=CHECKOUT_URL target="_blank" rel="noopener noreferrer">"Book Consult"</a>
        </nav>
    }
}

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <header>
            <h1>"Systems for the " <span>"New Economy"</span> "."</h1>
            <p>
                "I help freelance consultants and small businesses automate chaos, integrate AI agents, and reclaim their time."
            </p>
            <a href=CHECKOUT_URL target="_blank" rel="noopener noreferrer">"Book Consultation"</a>
            <a href="#store">"View Assets"</a>
        </header>
    }
}

#[component]
pub fn Process() -> impl IntoView {
    let steps = PROCESS_STEPS
        .iter()
        .map(|(step, title, desc)| {
            view! {
                <div class="step">
                    <span>{*step}</span>
                    <h3>{*title}</h3>
                    <p>{*desc}</p>
                </div>
            }
        })
        .collect::<Vec<_>>();

    view! { <section id="process">{steps}</section> }
}

#[component]
pub fn About() -> impl IntoView {
    view! {
        <section id="about">
            <img src="https://picsum.photos/400/400?grayscale" alt="Consultant Avatar"/>
            <h2>"Hi, I'm Alex."</h2>
            <p>
                "Former CTO turned operations consultant. I believe the future of small business belongs to those who leverage AI responsibly. My mission is to replace \"hustle culture\" with efficient systems."
            </p>
        </section>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Lumina."</div>
            <span>"Terms"</span>
            <span>"Privacy"</span>
            <a href="mailto:hello@example.com">"Contact"</a>
            <p>"© Lumina Consultancy."</p>
        </footer>
    }
}
