mod common;
mod ladder;
mod registration;
mod vacancies;
